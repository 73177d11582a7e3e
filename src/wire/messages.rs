//! Messages: entries, payloads and the signed `Message` envelope.

/// Kind tag for UTF-8 text entries.
pub const TEXT_UTF8: &str = "text-utf8";

/// One typed blob inside a payload.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Entry {
    #[prost(string, tag = "1")]
    pub kind: String,
    #[prost(bytes = "vec", tag = "2")]
    pub entry_data: Vec<u8>,
}

impl Entry {
    pub fn new(kind: impl Into<String>, entry_data: impl Into<Vec<u8>>) -> Self {
        Self { kind: kind.into(), entry_data: entry_data.into() }
    }

    /// `text-utf8` entry holding the UTF-8 bytes of `text`.
    pub fn text(text: &str) -> Self {
        Self::new(TEXT_UTF8, text.as_bytes())
    }

    /// Text content, if this is a `text-utf8` entry with valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        if self.kind != TEXT_UTF8 {
            return None;
        }
        std::str::from_utf8(&self.entry_data).ok()
    }
}

/// Timestamped, ordered list of entries. Entry order is significant.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Payload {
    #[prost(int64, tag = "1")]
    pub timestamp: i64,
    #[prost(message, repeated, tag = "2")]
    pub entries: Vec<Entry>,
}

impl Payload {
    pub fn new(timestamp: i64) -> Self {
        Self { timestamp, entries: Vec::new() }
    }

    /// Payload stamped with the current wall clock (seconds since epoch).
    pub fn now() -> Self {
        Self::new(chrono::Utc::now().timestamp())
    }

    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.push(entry);
        self
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}

/// Signed envelope around a serialized [`Payload`].
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Message {
    #[prost(bytes = "vec", tag = "1")]
    pub pub_key: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
    #[prost(int32, tag = "3")]
    pub scheme: i32,
    #[prost(bytes = "vec", tag = "4")]
    pub serialized_payload: Vec<u8>,
}

impl Message {
    /// Decode the wrapped payload. Does not check the signature.
    pub fn payload(&self) -> Result<Payload, crate::error::EnvelopeError> {
        super::decode(&self.serialized_payload)
    }
}

/// Body of message GET/PUT exchanges with a relay.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct MessageSet {
    #[prost(message, repeated, tag = "1")]
    pub messages: Vec<Message>,
}

impl From<Vec<Message>> for MessageSet {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}
