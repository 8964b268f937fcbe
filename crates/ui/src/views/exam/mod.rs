mod components;
mod keyboard;
mod view;

pub use view::ExamView;
