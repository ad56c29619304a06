pub mod google;

pub use google::GoogleSynthesizer;

pub mod prelude {
    pub use super::GoogleSynthesizer;
    pub use ac_core::{Result, SpeechSynthesizer};
}
