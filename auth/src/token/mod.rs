pub mod clock;
pub mod errors;
pub mod maker;
pub mod payload;

pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use errors::TokenError;
pub use maker::EncryptedTokenMaker;
pub use maker::TokenMaker;
pub use maker::SYMMETRIC_KEY_SIZE;
pub use payload::Payload;
