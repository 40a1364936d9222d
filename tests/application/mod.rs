mod fallback_generator_test;
mod stream_translator_test;
