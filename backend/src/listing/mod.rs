pub mod listing_fields;
