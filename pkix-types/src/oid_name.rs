/// Conventional short names for well-known OIDs, e.g. `CN` for `2.5.4.3` or
/// `secp384r1` for `1.3.132.0.34`.
pub trait OidName {
    fn oid_name(&self) -> Option<&'static str>;
}
