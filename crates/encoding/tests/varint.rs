use fastcrypto_encoding::{DecodeError, Decoder, Encoder, MAX_VARINT_VALUE};

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }
}

#[test]
fn varint_roundtrip_random() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..1_000 {
        let value = rng.next_u64() % (MAX_VARINT_VALUE + 1);
        let mut encoder = Encoder::new();
        encoder.write_varint(value).expect("encode varint");
        let bytes = encoder.into_inner();
        let mut decoder = Decoder::new(&bytes);
        let decoded = decoder.read_varint().expect("decode varint");
        assert_eq!(decoded, value);
        assert!(decoder.is_empty());
    }
}

#[test]
fn varint_width_boundaries() {
    let cases = [
        (0u64, 1usize),
        (63, 1),
        (64, 2),
        (16_383, 2),
        (16_384, 4),
        (MAX_VARINT_VALUE, 4),
    ];
    for (value, width) in cases {
        let mut encoder = Encoder::new();
        encoder.write_varint(value).expect("encode varint");
        let bytes = encoder.into_inner();
        assert_eq!(bytes.len(), width, "width for {value}");
        let mut decoder = Decoder::new(&bytes);
        assert_eq!(decoder.read_varint().expect("decode varint"), value);
    }
}

#[test]
fn varint_rejects_noncanonical() {
    // Value 1 padded out to 2- and 4-byte widths.
    let cases = [vec![0x05, 0x00], vec![0x06, 0x00, 0x00, 0x00]];
    for bytes in cases {
        let mut decoder = Decoder::new(&bytes);
        let err = decoder.read_varint().expect_err("noncanonical varint");
        assert_eq!(err, DecodeError::NonCanonicalVarInt);
    }
}

#[test]
fn varint_rejects_oversized() {
    // 4-byte width carrying MAX_VARINT_VALUE + 1.
    let raw: u32 = ((MAX_VARINT_VALUE as u32 + 1) << 2) | 2;
    let raw_bytes = raw.to_le_bytes();
    let mut decoder = Decoder::new(&raw_bytes);
    let err = decoder.read_varint().expect_err("oversized varint");
    assert_eq!(err, DecodeError::SizeTooLarge);

    // 8-byte width is always past the cap once canonical.
    let raw: u64 = (1u64 << 32) << 2 | 3;
    let raw_bytes = raw.to_le_bytes();
    let mut decoder = Decoder::new(&raw_bytes);
    let err = decoder.read_varint().expect_err("oversized 8-byte varint");
    assert_eq!(err, DecodeError::SizeTooLarge);
}

#[test]
fn varint_rejects_truncated() {
    let mut encoder = Encoder::new();
    encoder.write_varint(100_000).expect("encode varint");
    let bytes = encoder.into_inner();
    for cut in 0..bytes.len() {
        let mut decoder = Decoder::new(&bytes[..cut]);
        let err = decoder.read_varint().expect_err("truncated varint");
        assert_eq!(err, DecodeError::UnexpectedEof);
    }
}

#[test]
fn varint_encode_rejects_overflow() {
    let mut encoder = Encoder::new();
    assert!(encoder.write_varint(1u64 << 62).is_err());
    assert!(encoder.write_varint(u64::MAX).is_err());
}

#[test]
fn fixed_width_reads() {
    let mut encoder = Encoder::new();
    encoder.write_u8(0xab);
    encoder.write_u16_le(0x0102);
    encoder.write_u32_le(0xdead_beef);
    encoder.write_u64_le(0x0102_0304_0506_0708);
    encoder.write_bytes(&[1, 2, 3]);
    let bytes = encoder.into_inner();

    let mut decoder = Decoder::new(&bytes);
    assert_eq!(decoder.read_u8().unwrap(), 0xab);
    assert_eq!(decoder.read_u16_le().unwrap(), 0x0102);
    assert_eq!(decoder.read_u32_le().unwrap(), 0xdead_beef);
    assert_eq!(decoder.read_u64_le().unwrap(), 0x0102_0304_0506_0708);
    assert_eq!(decoder.read_fixed::<3>().unwrap(), [1, 2, 3]);
    assert!(decoder.is_empty());
    assert_eq!(decoder.read_u8().unwrap_err(), DecodeError::UnexpectedEof);
}
