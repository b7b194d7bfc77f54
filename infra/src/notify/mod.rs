//! Notifier implementations
//!
//! Real SMTP and SMS gateway adapters are deployment concerns wired in at
//! the application edge; the mock here logs deliveries and is what local
//! development and the test suites run against.

pub mod mock_notifier;

pub use mock_notifier::MockNotifier;
