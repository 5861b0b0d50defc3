/// Collection holding budget documents
pub const BUDGET_COLLECTION: &str = "budget";

/// Collection holding income documents
pub const INCOME_COLLECTION: &str = "income";

/// Collection holding outcome documents
pub const OUTCOME_COLLECTION: &str = "outcome";
