mod exam_vm;
mod markdown_vm;
mod palette_vm;
mod result_vm;
mod time_fmt;

pub use exam_vm::{
    CountdownVm, ExamScreen, InstructionsVm, OptionVm, QuestionVm, map_current_question,
    map_instructions, screen_for,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use palette_vm::{LegendEntryVm, PaletteCellVm, PaletteVm, map_palette, status_class};
pub use result_vm::{BreakdownRowVm, ResultVm, map_result};
pub use time_fmt::{Urgency, format_clock, format_elapsed};
