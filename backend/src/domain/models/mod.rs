pub mod student;
pub mod invoice;
pub mod expense;
pub mod settings;
pub mod user;

/// Branch every record falls back to when it carries no branch id
pub const DEFAULT_BRANCH: &str = "main";

/// Records that can be partitioned by branch
pub trait Branched {
    fn branch_id(&self) -> Option<&str>;

    /// The record's branch with the `main` fallback applied
    fn branch(&self) -> &str {
        self.branch_id().unwrap_or(DEFAULT_BRANCH)
    }
}
