use cleanspot_entities::pin::PinCode;

/// Source of candidate pin codes.
///
/// Codes are not guaranteed to be unique; the issuing use case checks
/// for collisions and asks for another candidate if necessary.
pub trait PinCodeSource {
    fn next_code(&self) -> PinCode;
}
