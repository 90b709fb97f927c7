use crc32fast::Hasher;

/// Derive a short, stable seed from an arbitrary source string using CRC32
pub fn get_seed(source: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for template nodes within one builder session
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Session seed (CRC32)
    count: u32,   // Sequential counter
}

impl IdGenerator {
    pub fn new(source: &str) -> Self {
        Self {
            seed: get_seed(source),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID with the given kind prefix
    pub fn new_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", prefix, self.seed, self.count)
    }

    /// Number of ids handed out so far
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
