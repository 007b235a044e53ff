use padezh_parser::SegmentError;

#[derive(Debug, thiserror::Error)]
pub enum InflectError {
    #[error(transparent)]
    Segment(#[from] SegmentError),
}
