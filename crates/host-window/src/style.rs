//! Window style bits this crate reads and patches.
//!
//! Mirrored as plain integers so style arithmetic can be exercised off
//! Windows; the values match `WS_CLIPSIBLINGS` / `WS_CLIPCHILDREN`.

pub const CLIP_SIBLINGS: u32 = 0x0400_0000;
pub const CLIP_CHILDREN: u32 = 0x0200_0000;

/// `style` with `bits` set, or `None` if they are already present.
pub fn with_bits(style: u32, bits: u32) -> Option<u32> {
    if style & bits == bits {
        None
    } else {
        Some(style | bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_bits_adds_missing_flag() {
        assert_eq!(with_bits(0x1000_0000, CLIP_SIBLINGS), Some(0x1400_0000));
    }

    #[test]
    fn with_bits_is_none_when_present() {
        assert_eq!(with_bits(CLIP_SIBLINGS | 0x1, CLIP_SIBLINGS), None);
    }

    #[cfg(windows)]
    #[test]
    fn constants_match_win32() {
        use windows::Win32::UI::WindowsAndMessaging::{WS_CLIPCHILDREN, WS_CLIPSIBLINGS};
        assert_eq!(CLIP_SIBLINGS, WS_CLIPSIBLINGS.0);
        assert_eq!(CLIP_CHILDREN, WS_CLIPCHILDREN.0);
    }
}
