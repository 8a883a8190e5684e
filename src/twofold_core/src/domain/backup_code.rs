use rand::Rng;

const BACKUP_CODE_LENGTH: usize = 8;
const BACKUP_CODE_COUNT: usize = 10;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Single-use fallback credential substituting for a TOTP code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupCode(String);

impl BackupCode {
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let code = (0..BACKUP_CODE_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect();
        Self(code)
    }

    /// The ten codes handed to the user at TOTP enrollment.
    pub fn generate_set() -> Vec<Self> {
        (0..BACKUP_CODE_COUNT).map(|_| Self::generate()).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}
