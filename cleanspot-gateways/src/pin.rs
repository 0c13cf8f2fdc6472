use rand::Rng;

use cleanspot_core::gateways::pin_source::PinCodeSource;
use cleanspot_entities::pin::PinCode;

/// Draws pin codes from the thread-local RNG.
///
/// Uniqueness is not guaranteed here; the issuing use case detects
/// collisions and retries with a fresh candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPinSource;

impl PinCodeSource for RandomPinSource {
    fn next_code(&self) -> PinCode {
        let mut rng = rand::thread_rng();
        PinCode::from_groups(std::array::from_fn(|_| rng.gen_range(0..10_000)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_well_formed() {
        let source = RandomPinSource;
        for _ in 0..100 {
            let code = source.next_code();
            assert!(code.as_str().parse::<PinCode>().is_ok());
        }
    }
}
