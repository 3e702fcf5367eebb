pub mod practitioner;
