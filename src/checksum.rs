/// Modulo 256 sum of `bytes`.
pub(crate) fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// The checksum byte for a frame whose checksummed region is `bytes`.
///
/// Appending the result makes the region sum to `0xFF`.
pub(crate) fn checksum(bytes: &[u8]) -> u8 {
    0xFF - sum(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_wraps() {
        assert_eq!(sum(&[0xF0, 0x20]), 0x10);
        assert_eq!(sum(&[]), 0);
    }

    #[test]
    fn test_checksum_completes_region() {
        let region = [0x01, 0x00, 0x12, 0x34, 0x01, 0x41, 0x42];
        let cs = checksum(&region);
        assert_eq!(cs, 0x34);
        assert_eq!(sum(&region).wrapping_add(cs), 0xFF);
    }
}
