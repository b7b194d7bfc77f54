//! One-time-code generation

use rand::rngs::OsRng;
use rand::RngCore;

use crate::domain::entities::otp_challenge::CODE_LENGTH;

/// Source of verification codes
///
/// Injectable so tests can pin the code; production uses the OS CSPRNG.
pub trait CodeGenerator: Send + Sync {
    /// Produce a fresh fixed-length numeric code
    fn generate(&self) -> String;
}

/// Cryptographically secure code generator backed by `OsRng`
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = OsRng;
        let mut bytes = [0u8; 4];
        rng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes);
        // Modulo bias is negligible at this code length
        let code = num % 10u32.pow(CODE_LENGTH as u32);
        format!("{:0width$}", code, width = CODE_LENGTH)
    }
}

/// Generator that always returns the same code, for tests and local runs
#[derive(Debug, Clone)]
pub struct FixedCodeGenerator {
    code: String,
}

impl FixedCodeGenerator {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        self.code.clone()
    }
}
