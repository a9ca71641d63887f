use crate::{sscanf, sscanf_s, swscanf};

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buffer: &[u8]) -> &str {
        let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
        std::str::from_utf8(&buffer[..end]).unwrap()
    }

    #[test]
    fn demonstrate_c_formats() {
        // Example 1: Numbers and words
        println!("=== Numbers and words ===");
        let mut name = [0u8; 16];
        let mut age = 0u32;
        let mut unit = [0u8; 8];
        let assigned = sscanf!("Alice: 30 years old", "%15[^:]: %u %7s old", &mut name, &mut age, &mut unit);
        println!("Parsed {}: name={}, age={}, unit={}", assigned, text(&name), age, text(&unit));
        assert_eq!(assigned, 3);
        assert_eq!(text(&name), "Alice");
        assert_eq!(age, 30);
        assert_eq!(text(&unit), "years");

        // Example 2: Floating point and suppression
        println!("\n=== Floating point and suppression ===");
        let mut weight = 0f32;
        let assigned = sscanf!("Charlie: 35.5 kg", "%*s %f", &mut weight);
        println!("Parsed {}: weight={}", assigned, weight);
        assert_eq!(assigned, 1);
        assert_eq!(weight, 35.5);

        // Example 3: Hex, octal and auto-detected bases
        println!("\n=== Bases ===");
        let (mut hex, mut octal, mut detected) = (0i32, 0i32, 0i32);
        let assigned = sscanf!("ff 17 0x1f", "%x %o %i", &mut hex, &mut octal, &mut detected);
        println!("Parsed {}: hex={}, octal={}, detected={}", assigned, hex, octal, detected);
        assert_eq!((hex, octal, detected), (255, 15, 31));

        // Example 4: Characters consumed
        println!("\n=== Characters consumed ===");
        let mut value = 0i64;
        let mut consumed = 0i32;
        sscanf!("  -42 rest", "%lld%n", &mut value, &mut consumed);
        println!("Parsed value={} after {} characters", value, consumed);
        assert_eq!((value, consumed), (-42, 5));
    }

    #[test]
    fn demonstrate_secure_and_wide() {
        // Example 5: Secure variant with explicit capacity
        println!("=== Secure variant ===");
        let mut word = [0u8; 4];
        let assigned = sscanf_s!("toolong", "%s", &mut word, 4);
        println!("Parsed {}: buffer emptied = {}", assigned, word[0] == 0);
        assert_eq!(assigned, 0);
        assert_eq!(word[0], 0);

        // Example 6: Wide input into a narrow buffer
        println!("\n=== Wide input ===");
        let input: Vec<u16> = "Zoë 7".encode_utf16().collect();
        let mut narrow = [0u8; 8];
        let mut number = 0i32;
        let assigned = swscanf!(input, "%hs %d", &mut narrow, &mut number);
        println!("Parsed {}: number={}", assigned, number);
        assert_eq!(assigned, 2);
        assert_eq!(&narrow[..4], b"Zo\xeb\0");
        assert_eq!(number, 7);
    }
}
