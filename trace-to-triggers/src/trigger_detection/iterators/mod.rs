pub mod event;
pub mod save_to_file;

use super::{Assembler, Detector, Real, trigger::Trigger};

pub use event::{AssembleFilter, EventFilter};
pub use save_to_file::SaveToFileFilter;
