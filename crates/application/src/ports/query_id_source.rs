/// Supplies the 16-bit transaction ID for each outbound query.
///
/// Uniqueness across outstanding queries is the caller's concern.
pub trait QueryIdSource: Send + Sync {
    fn next_id(&self) -> u16;
}
