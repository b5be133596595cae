use crate::{Base32Error, Error, Kind, KindId, Ulid};
use std::collections::HashSet;

enum TestKind {}

impl Kind for TestKind {
    const NUMBER: u16 = u16::MAX;
    const IDENT: &'static str = "test";
    const SHORT_IDENT: &'static str = "tst";
}

enum Account {}

impl Kind for Account {
    const NUMBER: u16 = 0x0102;
    const IDENT: &'static str = "account";
    const SHORT_IDENT: &'static str = "acct";
}

enum Zero {}

impl Kind for Zero {
    const NUMBER: u16 = 0;
    const IDENT: &'static str = "zero";
    const SHORT_IDENT: &'static str = "z";
}

type TestId = KindId<TestKind>;

const LITERAL: &str = "01JBRQS1J5A085FYY2M7ZXWG00";
const SHORT: &str = "tst_01JBRQS1J5A085FYY2M7ZXXZ";

fn fixture() -> TestId {
    TestId::must_from_ulid(LITERAL)
}

#[test]
fn from_ulid_enforces_trailing_bytes() {
    assert_eq!(
        fixture().as_bytes(),
        &[1, 146, 241, 124, 134, 69, 80, 16, 87, 251, 194, 161, 255, 222, 255, 255]
    );
    let account = KindId::<Account>::must_from_ulid(LITERAL);
    assert_eq!(account.as_bytes()[..14], fixture().as_bytes()[..14]);
    assert_eq!(account.as_bytes()[14..], [0x01, 0x02]);
}

#[test]
fn make_stamps_suffix() {
    let id = TestId::make();
    assert_eq!(id.as_bytes()[14..], [255, 255]);

    let id = KindId::<Account>::make();
    assert_eq!(id.as_bytes()[14..], [0x01, 0x02]);

    let id = KindId::<Zero>::make_with(crate::Backoff::Spin);
    assert_eq!(id.as_bytes()[14..], [0, 0]);
}

#[test]
fn make_is_sorted_and_unique() {
    let ids: Vec<TestId> = (0..2048).map(|_| TestId::make()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert!(ids.iter().all(|id| id.as_bytes()[14..] == [255, 255]));
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
}

#[test]
fn timestamp_reads_first_six_bytes() {
    assert_eq!(fixture().timestamp(), 0x0192_F17C_8645);
    assert_eq!(u128::from(fixture().timestamp()), fixture().ulid().timestamp());
}

#[test]
fn marshal_text_to_rejects_wrong_buffer_size() {
    let id = fixture();
    let mut empty: [u8; 0] = [];
    assert_eq!(
        id.marshal_text_to(&mut empty),
        Err(Error::BufferSize {
            expected: 28,
            actual: 0
        })
    );

    for len in (0..64).filter(|&len| len != TestId::encoded_len()) {
        let mut dst = vec![b'.'; len];
        assert!(matches!(
            id.marshal_text_to(&mut dst),
            Err(Error::BufferSize { .. })
        ));
        assert!(dst.iter().all(|&b| b == b'.'));
    }

    let account = KindId::<Account>::make();
    let mut dst = [0; 28];
    assert_eq!(
        account.marshal_text_to(&mut dst),
        Err(Error::BufferSize {
            expected: 29,
            actual: 28
        })
    );
}

#[test]
fn marshal_text_to() {
    let id = fixture();
    let mut dst = vec![0; id_len()];
    id.marshal_text_to(&mut dst).unwrap();
    assert_eq!(dst, SHORT.as_bytes());
}

fn id_len() -> usize {
    TestId::prefix_len() + 24
}

#[test]
fn marshal_text() {
    assert_eq!(fixture().marshal_text().unwrap(), SHORT.as_bytes());
    assert_eq!(TestId::encoded_len(), SHORT.len());
    assert_eq!(TestId::prefix_len(), 4);
}

#[test]
fn display_uses_short_form() {
    assert_eq!(fixture().to_string(), SHORT);
    assert_eq!(format!("{:?}", fixture()), format!("KindId({SHORT})"));
}

#[test]
fn unmarshal_short_form() {
    let text = fixture().marshal_text().unwrap();
    let mut id = TestId::default();
    id.unmarshal_text(&text).unwrap();
    assert_eq!(id, fixture());
    assert_eq!(id.to_string(), SHORT);
}

#[test]
fn unmarshal_is_case_insensitive_in_body() {
    let id: TestId = "tst_01jbrqs1j5a085fyy2m7zxxz".parse().unwrap();
    assert_eq!(id, fixture());
}

#[test]
fn unmarshal_long_form() {
    let mut id = TestId::default();
    id.unmarshal_text(b"01JBRQS1J5A085FYY2M7ZXXZZZ").unwrap();
    assert_eq!(id, fixture());
}

#[test]
fn unmarshal_long_form_with_wrong_suffix() {
    let mut id = TestId::default();
    assert_eq!(
        id.unmarshal_text(b"01JBRQS1J5A085FYY2M7ZXXZZE"),
        Err(Error::InvalidSuffix {
            expected: 0xFFFF,
            actual: 0xFFEE
        })
    );
    assert_eq!(id, TestId::default());
}

#[test]
fn unmarshal_without_prefix_in_short_form() {
    let mut id = fixture();
    assert_eq!(
        id.unmarshal_text(b"01JBRQS1J5A085FYY2M7ZXXZ"),
        Err(Error::MissingPrefix)
    );
    assert_eq!(id, fixture());
    assert_eq!(TestId::parse(""), Err(Error::MissingPrefix));
    assert_eq!(
        TestId::parse("tst_"),
        Err(Error::Decode(Base32Error::DecodeInvalidLen {
            len: 0,
            expected: 24
        }))
    );
}

#[test]
fn unmarshal_malformed_body() {
    assert_eq!(
        TestId::parse("tst_01JBRQS1J5A085FYY2M7ZX!Z"),
        Err(Error::Decode(Base32Error::DecodeInvalidAscii {
            byte: b'!',
            index: 22
        }))
    );
    assert_eq!(
        TestId::parse("tst_81JBRQS1J5A085FYY2M7ZXXZ"),
        Err(Error::Decode(Base32Error::DecodeOverflow { byte: '8' }))
    );
    assert!(matches!(
        TestId::parse("01JBRQS1J5A085FYY2M7ZXXZZ_"),
        Err(Error::Decode(Base32Error::DecodeInvalidAscii { .. }))
    ));
}

#[test]
fn other_kinds_prefix_is_rejected() {
    let account = KindId::<Account>::must_from_ulid(LITERAL);
    assert!(TestId::parse(account.to_string()).is_err());
    assert!(KindId::<Account>::parse(fixture().to_string()).is_err());

    // Same prefix spelled for another kind's tag: the body's tail disagrees.
    let zero = KindId::<Zero>::must_from_ulid(LITERAL);
    let forged = format!("tst_{}", &zero.to_string()[2..]);
    assert_eq!(
        TestId::parse(forged),
        Err(Error::InvalidSuffix {
            expected: 0xFFFF,
            actual: 0x03FF
        })
    );
}

#[test]
fn long_form_of_other_kind_is_rejected() {
    let account = KindId::<Account>::make();
    let long = account.ulid().to_string();
    assert_eq!(
        TestId::parse(&long),
        Err(Error::InvalidSuffix {
            expected: 0xFFFF,
            actual: 0x0102
        })
    );
    assert_eq!(KindId::<Account>::parse(&long), Ok(account));
}

#[test]
fn roundtrip_both_forms() {
    fn check<K: Kind>() {
        for _ in 0..256 {
            let id = KindId::<K>::make();
            assert_eq!(KindId::<K>::parse(id.to_string()), Ok(id));
            assert_eq!(KindId::<K>::parse(id.marshal_text().unwrap()), Ok(id));
            assert_eq!(KindId::<K>::parse(id.ulid().to_string()), Ok(id));
        }
    }
    check::<TestKind>();
    check::<Account>();
    check::<Zero>();
}

#[test]
#[should_panic(expected = "failed to parse ulid: invalid length: expected 26, got 1")]
fn must_from_ulid_panics_on_invalid_ulid() {
    let _ = TestId::must_from_ulid("0");
}

#[test]
fn from_ulid_wraps_parse_error() {
    let err = TestId::from_ulid("0").unwrap_err();
    assert_eq!(
        err,
        Error::FromUlid(Base32Error::DecodeInvalidLen {
            len: 1,
            expected: 26
        })
    );
    assert_eq!(
        err.to_string(),
        "failed to parse ulid: invalid length: expected 26, got 1"
    );
    assert_eq!(
        err.base32(),
        Some(&Base32Error::DecodeInvalidLen {
            len: 1,
            expected: 26
        })
    );
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn from_bytes_validates_suffix() {
    let bytes = fixture().to_bytes();
    assert_eq!(TestId::from_bytes(bytes), Ok(fixture()));
    assert_eq!(
        KindId::<Account>::from_bytes(bytes),
        Err(Error::InvalidSuffix {
            expected: 0x0102,
            actual: 0xFFFF
        })
    );
    assert_eq!(TestId::try_from(&bytes[..]), Ok(fixture()));
    assert_eq!(
        TestId::try_from(&bytes[..15]),
        Err(Error::InvalidByteLength { len: 15 })
    );
}

#[test]
fn ulid_conversions_stamp_suffix() {
    let ulid = Ulid::decode(LITERAL).unwrap();
    let id = TestId::from(ulid);
    assert_eq!(id, fixture());
    assert_ne!(Ulid::from(id), ulid);
    assert_eq!(<[u8; 16]>::from(id), *fixture().as_bytes());
}

#[test]
fn default_is_stamped_nil() {
    let id = KindId::<Account>::default();
    assert_eq!(id.as_bytes(), &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2]);
    assert_eq!(id.kind().ident, "account");
}
