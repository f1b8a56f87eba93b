pub mod required_field;
