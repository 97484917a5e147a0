pub mod recorder;

pub use recorder::EventRecorder;
