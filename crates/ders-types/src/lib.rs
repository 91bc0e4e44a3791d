pub mod id;
pub mod level;
pub mod module;
pub mod row;
pub mod table;

pub use id::{ModuleId, ParseModuleIdError};
pub use level::{Level, ParseLevelError};
pub use module::{ChoiceOption, LessonModule, MultipleChoice, QaItem};
pub use row::ExampleRow;
pub use table::Table;
