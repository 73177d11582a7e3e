//! Filters: what an address charges to accept or notify on inbound messages.

/// Price-based filter.
#[derive(Clone, Copy, PartialEq, Eq, prost::Message)]
pub struct PriceFilter {
    #[prost(bool, tag = "1")]
    pub public: bool,
    #[prost(uint64, tag = "2")]
    pub acceptance_price: u64,
    #[prost(uint64, tag = "3")]
    pub notification_price: u64,
}

/// Tagged union of filter kinds. A variant this build does not know decodes
/// to `kind: None` instead of failing the surrounding message.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Filter {
    #[prost(oneof = "filter::Kind", tags = "1")]
    pub kind: Option<filter::Kind>,
}

pub mod filter {
    #[derive(Clone, PartialEq, Eq, prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        PriceFilter(super::PriceFilter),
    }
}

impl Filter {
    pub fn price(public: bool, acceptance_price: u64, notification_price: u64) -> Self {
        Self {
            kind: Some(filter::Kind::PriceFilter(PriceFilter {
                public,
                acceptance_price,
                notification_price,
            })),
        }
    }

    pub fn as_price(&self) -> Option<&PriceFilter> {
        match &self.kind {
            Some(filter::Kind::PriceFilter(p)) => Some(p),
            None => None,
        }
    }
}

impl From<PriceFilter> for Filter {
    fn from(p: PriceFilter) -> Self {
        Self { kind: Some(filter::Kind::PriceFilter(p)) }
    }
}

/// Filters currently registered for an address.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Filters {
    #[prost(message, repeated, tag = "1")]
    pub filters: Vec<Filter>,
}

/// Signed envelope around a serialized [`Filter`].
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct FilterApplication {
    #[prost(bytes = "vec", tag = "1")]
    pub pub_key: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
    #[prost(int32, tag = "3")]
    pub scheme: i32,
    #[prost(bytes = "vec", tag = "4")]
    pub serialized_payload: Vec<u8>,
}

impl FilterApplication {
    /// Decode the wrapped filter. Does not check the signature.
    pub fn filter(&self) -> Result<Filter, crate::error::EnvelopeError> {
        super::decode(&self.serialized_payload)
    }
}
