mod in_memory_transcript_repository_test;
mod tracing_config_test;
