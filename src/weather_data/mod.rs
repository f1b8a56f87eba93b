pub mod record_parser;
