/// Character budget for the text handed to a generation provider, derived
/// from an assumed token budget and a chars-per-token ratio. The ratio is an
/// approximation that varies by tokenizer, so both knobs are configuration.
#[derive(Debug, Clone, Copy)]
pub struct TruncationBudget {
    max_tokens: usize,
    chars_per_token: usize,
}

impl TruncationBudget {
    pub fn new(max_tokens: usize, chars_per_token: usize) -> Self {
        Self {
            max_tokens,
            chars_per_token,
        }
    }

    pub fn char_ceiling(&self) -> usize {
        self.max_tokens * self.chars_per_token
    }
}

/// Header lines kept verbatim per block: short SHA, timestamp, message.
const HEADER_LINES: usize = 3;
const BODY_EXCERPT_CHARS: usize = 200;
/// Rough per-block size used to decide how many leading blocks survive
/// the final tier.
const BLOCK_SIZE_ESTIMATE: usize = 400;
const TRUNCATION_MARKER: &str = "... (truncated)";

/// Shrinks the diff-blocks into a single string within the budget.
///
/// Three strictly degrading tiers, each applied only if the previous one
/// still overflows: join unchanged, shorten every block body, then drop
/// trailing blocks entirely. Deterministic and order-preserving; earlier
/// blocks always win over later ones.
pub fn truncate_diffs(blocks: &[String], budget: &TruncationBudget) -> String {
    let ceiling = budget.char_ceiling();

    let joined = blocks.join("\n\n");
    if joined.len() <= ceiling {
        return joined;
    }

    let shortened: Vec<String> = blocks.iter().map(|block| shorten_block(block)).collect();
    let rejoined = shortened.join("\n\n");
    if rejoined.len() <= ceiling {
        return rejoined;
    }

    let keep = (ceiling / BLOCK_SIZE_ESTIMATE).min(shortened.len());
    let omitted = shortened.len() - keep;
    let mut output = shortened[..keep].join("\n\n");
    if omitted > 0 {
        if !output.is_empty() {
            output.push_str("\n\n");
        }
        output.push_str(&format!("... and {omitted} more changes omitted"));
    }
    output
}

/// Keeps the three header lines verbatim and replaces the rest of the block
/// with a bounded excerpt.
fn shorten_block(block: &str) -> String {
    let mut parts = block.splitn(HEADER_LINES + 1, '\n');
    let header: Vec<&str> = parts.by_ref().take(HEADER_LINES).collect();
    let Some(body) = parts.next() else {
        return block.to_string();
    };

    let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
    let cut = body.chars().count() > BODY_EXCERPT_CHARS;

    let mut result = header.join("\n");
    result.push('\n');
    result.push_str(&excerpt);
    if cut {
        result.push_str(TRUNCATION_MARKER);
    }
    result
}
