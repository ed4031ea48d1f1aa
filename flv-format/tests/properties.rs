use flv_format::{
    CodecConfig, FileHeader, HeaderFlags, TagKind, TagRecord, TimestampLayout, TrailingSize,
};
use proptest::prelude::*;

fn arb_flags() -> impl Strategy<Value = HeaderFlags> {
    prop_oneof![
        Just(HeaderFlags::Audio),
        Just(HeaderFlags::Video),
        Just(HeaderFlags::AudioVideo),
    ]
}

fn arb_kind() -> impl Strategy<Value = TagKind> {
    prop_oneof![
        Just(TagKind::Audio),
        Just(TagKind::Video),
        Just(TagKind::Script),
    ]
}

fn arb_tag() -> impl Strategy<Value = TagRecord> {
    (
        arb_kind(),
        any::<u32>(),
        0u32..=0xff_ffff,
        prop::collection::vec(any::<u8>(), 0..2048),
    )
        .prop_map(|(kind, timestamp, stream_id, data)| {
            let mut tag = TagRecord::new(kind, timestamp, data);
            tag.stream_id = stream_id;
            tag
        })
}

fn arb_config() -> impl Strategy<Value = CodecConfig> {
    (any::<bool>(), any::<bool>()).prop_map(|(with_prefix, extended)| {
        CodecConfig::new()
            .with_trailing_size(if with_prefix {
                TrailingSize::WithPrefix
            } else {
                TrailingSize::PayloadOnly
            })
            .with_timestamp(if extended {
                TimestampLayout::Extended
            } else {
                TimestampLayout::Contiguous
            })
            .with_verify_trailing_size(true)
    })
}

proptest! {
    #[test]
    fn header_round_trips(version in any::<u8>(), flags in arb_flags(), data_offset in any::<u32>()) {
        let header = FileHeader { version, flags, data_offset };
        let mut bytes = Vec::new();
        prop_assert_eq!(header.write_to(&mut bytes).unwrap(), 9);

        let mut decoded = FileHeader::default();
        prop_assert_eq!(decoded.read_from(&mut bytes.as_slice()).unwrap(), Some(9));
        prop_assert_eq!(decoded, header);
    }

    #[test]
    fn tag_round_trips(tag in arb_tag(), config in arb_config()) {
        let mut bytes = Vec::new();
        let written = tag.write_to_with(&mut bytes, &config).unwrap();
        prop_assert_eq!(written, tag.encoded_len());

        let mut decoded = TagRecord::default();
        let read = decoded.read_from_with(&mut bytes.as_slice(), &config).unwrap();
        prop_assert_eq!(read, Some(written));
        prop_assert_eq!(decoded.kind, tag.kind);
        prop_assert_eq!(decoded.timestamp, tag.timestamp);
        prop_assert_eq!(decoded.stream_id, tag.stream_id);
        prop_assert_eq!(&decoded.data, &tag.data);
    }

    #[test]
    fn reused_record_matches_each_tag(tags in prop::collection::vec(arb_tag(), 1..8)) {
        let mut bytes = Vec::new();
        for tag in &tags {
            tag.write_to(&mut bytes).unwrap();
        }

        let mut input = bytes.as_slice();
        let mut decoded = TagRecord::default();
        for tag in &tags {
            decoded.read_from(&mut input).unwrap();
            prop_assert_eq!(decoded.data_size(), tag.data_size());
            prop_assert_eq!(&decoded.data, &tag.data);
        }
        prop_assert_eq!(decoded.read_from(&mut input).unwrap(), None);
    }

    #[test]
    fn illegal_flags_never_read_payload(flag in any::<u8>(), data in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assume!(!matches!(flag, 0x08 | 0x09 | 0x12));
        let mut bytes = Vec::new();
        TagRecord::new(TagKind::Audio, 0, data).write_to(&mut bytes).unwrap();
        bytes[0] = flag;

        let mut input = bytes.as_slice();
        let err = TagRecord::default().read_from(&mut input).unwrap_err();
        let is_tag_format = matches!(err, flv_format::Error::InvalidTagFormat { .. });
        prop_assert!(is_tag_format);
        prop_assert_eq!(input.len(), bytes.len() - 11);
    }
}
