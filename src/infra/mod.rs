pub mod github;
pub mod greptile;
pub mod openai;
pub mod publish;
