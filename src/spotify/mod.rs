//! # Spotify Integration Module
//!
//! Integration layer between the Release Radar tool and the Spotify Web API.
//! It covers the two concerns the application has towards the service:
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow: building the
//!   authorization URL, receiving the code on the local callback listener
//!   through a one-shot channel, exchanging it for a token with HTTP Basic
//!   client authentication, and refreshing expired tokens.
//! - [`client`] - [`SpotifyClient`], a thin HTTP client implementing the
//!   [`crate::management::Catalog`] contract: playlist fetch, batched album
//!   lookup, album track pages, album search, playlist creation, track
//!   addition, playlist listing and unfollowing.
//!
//! ## Request model
//!
//! Every client method performs exactly one request and returns a typed
//! response; batching (20 album ids, 100 track URIs) and pagination (50
//! search results or album tracks per page) are driven by the management
//! layer so their loop bounds stay testable. All requests are sequential
//! and none is retried; failures surface immediately as
//! [`crate::error::Error`] values.
//!
//! ## API coverage
//!
//! - `GET /playlists/{id}` - source playlist with one page of tracks
//! - `GET /albums` - batch album details with embedded first track page
//! - `GET /albums/{id}/tracks` - further track pages
//! - `GET /search` - album search with the recency tag
//! - `GET /users/{id}/playlists` - playlist listing
//! - `POST /users/{id}/playlists` - playlist creation
//! - `POST /playlists/{id}/tracks` - track addition
//! - `DELETE /playlists/{id}/followers` - playlist retirement
//! - `GET /me` - acting user in server mode
//! - `POST /api/token` - code exchange and token refresh

pub mod auth;
pub mod client;

pub use client::SpotifyClient;
