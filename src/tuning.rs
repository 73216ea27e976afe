//! Resolution of k1 and b from the collection's average document length.

use crate::config::Param;

pub const SHORT_K1: f64 = 1.2;
pub const SHORT_B: f64 = 0.3;
pub const LONG_K1: f64 = 1.5;
pub const LONG_B: f64 = 0.75;

/// Collections whose average length exceeds this use the long defaults.
pub const LONG_COLLECTION_THRESHOLD: f64 = 100.0;

/// Where a resolved parameter value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tuning {
    Short,
    Long,
    Pinned,
}

impl Tuning {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tuning::Short => "short",
            Tuning::Long => "long",
            Tuning::Pinned => "pinned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub value: f64,
    pub source: Tuning,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub k1: Resolved,
    pub b: Resolved,
}

/// Decide the effective constants once, after indexing.
pub fn resolve(k1: Param, b: Param, avg_doc_length: f64) -> Parameters {
    let long = avg_doc_length > LONG_COLLECTION_THRESHOLD;
    Parameters {
        k1: resolve_one(k1, long, SHORT_K1, LONG_K1),
        b: resolve_one(b, long, SHORT_B, LONG_B),
    }
}

fn resolve_one(param: Param, long: bool, short: f64, long_value: f64) -> Resolved {
    match param {
        Param::Pinned(value) => Resolved {
            value,
            source: Tuning::Pinned,
        },
        Param::Auto if long => Resolved {
            value: long_value,
            source: Tuning::Long,
        },
        Param::Auto => Resolved {
            value: short,
            source: Tuning::Short,
        },
    }
}
