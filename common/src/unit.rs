//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity update.
#[derive(Clone, Copy, Debug)]
pub struct Update;

/// Marker type describing an entity deletion.
#[derive(Clone, Copy, Debug)]
pub struct Deletion;

/// Marker type describing an entity being featured.
#[derive(Clone, Copy, Debug)]
pub struct Featuring;

/// Marker type describing the last message of a conversation.
#[derive(Clone, Copy, Debug)]
pub struct LastMessage;

/// Marker type describing a read watermark.
#[derive(Clone, Copy, Debug)]
pub struct ReadMark;
