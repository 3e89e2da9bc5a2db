//! Wire protocol for Tourney.
//!
//! This crate defines the "language" the client and the remote API speak:
//!
//! - **Types** ([`Tournament`], [`Match`], [`TournamentPlayer`], [`User`]
//!   and the response envelopes): what the server sends back.
//! - **Requests** ([`Credentials`], [`TournamentForm`], [`MatchForm`], …):
//!   typed request bodies, each declaring its fields.
//! - **Form encoding** ([`encode_form`]): JSON or multipart, chosen from
//!   those declarations.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): bytes ↔ values.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! Transport (HttpRequest/HttpResponse) → Protocol (typed DTOs) → Client (façades)
//! ```
//!
//! The protocol layer doesn't know about sessions or endpoints. It only
//! knows how to shape bodies and read them back.

mod codec;
mod error;
mod form;
mod requests;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use form::{encode_form, encoding_of, BodyEncoding, FieldKind, FieldSpec, FieldValue, FormPayload};
pub use requests::{Credentials, MatchForm, ProfileUpdate, Registration, TournamentForm};
pub use tourney_transport::FileUpload;
pub use types::{
    ErrorBody, LoginResponse, Match, MatchEnvelope, MatchId, MatchList, RegisterResponse, Roster,
    Tournament, TournamentEnvelope, TournamentId, TournamentList, TournamentPlayer, User, UserId,
};
