use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown feature '{0}'. Expected one of: multi-channel, ai-content, automation, segmentation, ab-testing")]
    UnknownFeature(String),
}
