mod add;
pub mod change_types;
mod selector;
pub mod summary;

pub use add::{AddInput, AddOperation, AddResult};
pub use change_types::{CategoriesChosen, CollectorOutput, PreviousAnswers};
pub use selector::select_releases;
pub use summary::collect_summary;
