use sdl2::keyboard::Keycode;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: Keycode) -> Option<u8> {
    match key {
        Keycode::X => Some(0x0),
        Keycode::Num1 => Some(0x1),
        Keycode::Num2 => Some(0x2),
        Keycode::Num3 => Some(0x3),
        Keycode::Q => Some(0x4),
        Keycode::W => Some(0x5),
        Keycode::E => Some(0x6),
        Keycode::A => Some(0x7),
        Keycode::S => Some(0x8),
        Keycode::D => Some(0x9),
        Keycode::Z => Some(0xA),
        Keycode::C => Some(0xB),
        Keycode::Num4 => Some(0xC),
        Keycode::R => Some(0xD),
        Keycode::F => Some(0xE),
        Keycode::V => Some(0xF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_every_hex_key() {
        let keys = [
            Keycode::Num1, Keycode::Num2, Keycode::Num3, Keycode::Num4,
            Keycode::Q, Keycode::W, Keycode::E, Keycode::R,
            Keycode::A, Keycode::S, Keycode::D, Keycode::F,
            Keycode::Z, Keycode::X, Keycode::C, Keycode::V,
        ];
        let mut mapped: Vec<u8> = keys.iter().filter_map(|&k| keymap(k)).collect();
        mapped.sort_unstable();
        assert_eq!(mapped, (0x0..=0xF).collect::<Vec<u8>>());
    }

    #[test]
    fn test_keymap_ignores_other_keys() {
        assert_eq!(keymap(Keycode::Space), None);
        assert_eq!(keymap(Keycode::Escape), None);
    }
}
