mod about;
mod exam;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use about::AboutView;
pub use exam::ExamView;
pub use state::ViewError;
