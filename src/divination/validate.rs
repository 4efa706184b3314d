use super::DivinationError;

/// Six validated throws of three coins each, first throw = bottom line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinThrows(pub [[u8; 3]; 6]);

impl CoinThrows {
    pub fn as_array(&self) -> &[[u8; 3]; 6] {
        &self.0
    }
}

impl TryFrom<Vec<Vec<u8>>> for CoinThrows {
    type Error = DivinationError;

    /// Check throw count, coin count and coin values. Throw numbers in errors are 1-based.
    fn try_from(raw: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        if raw.len() != 6 {
            return Err(DivinationError::WrongThrowCount(raw.len()));
        }

        let mut throws = [[0u8; 3]; 6];
        for (i, coins) in raw.iter().enumerate() {
            let throw = i + 1;
            if coins.len() != 3 {
                return Err(DivinationError::WrongCoinCount {
                    throw,
                    coins: coins.len(),
                });
            }
            if let Some(&value) = coins.iter().find(|&&c| c > 1) {
                return Err(DivinationError::InvalidCoinValue { throw, value });
            }
            throws[i].copy_from_slice(coins);
        }

        Ok(Self(throws))
    }
}
