//! Domain models for property listings

pub mod listing;

pub use listing::{
    contact_email, join_gallery, Listing, ListingInput, ListingUpdate, NewListing,
    PLACEHOLDER_IMAGE,
};
