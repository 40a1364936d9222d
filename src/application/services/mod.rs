mod fallback_generator;
mod stream_translator;
mod summary_relay;

pub use fallback_generator::{
    DEFAULT_TEMPLATE, FallbackError, FallbackGenerator, FallbackPacing, FallbackStream,
    INTRO_MESSAGE, TRANSCRIPT_PLACEHOLDER,
};
pub use stream_translator::{STRUCTURED_MARKER, translate, translate_stream};
pub use summary_relay::{ClientEventStream, SummaryRelay, SummaryTarget};
