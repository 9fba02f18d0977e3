// SPDX-License-Identifier: Apache-2.0

//! UTF-16 surrogate pair handling in `\uXXXX` escapes: a high surrogate
//! must be immediately followed by an escaped low surrogate, and the pair
//! combines into a single supplementary-plane codepoint. Every unpaired
//! arrangement is a distinct latched error.

use pulljson::{ChunkReader, Decoder, SliceDecoder, Source, StreamDecoder};

fn stream(json: &[u8]) -> StreamDecoder<ChunkReader<'_>> {
    Decoder::from_reader(ChunkReader::new(json, 1))
}

macro_rules! both_backends {
    ($($name:ident on $json:expr;)*) => {
        paste::paste! {
            $(
                #[test_log::test]
                fn [<$name _slice>]() {
                    $name(&mut SliceDecoder::new($json));
                }

                #[test_log::test]
                fn [<$name _stream>]() {
                    $name(&mut stream($json));
                }
            )*
        }
    };
}

both_backends! {
    pair_combines_to_emoji on br#""\uD83D\uDE00""#;
    pair_at_plane_boundaries on br#""\uD800\uDC00 \uDBFF\uDFFF""#;
    pair_mixes_with_plain_text on br#""ok \uD83D\uDE00 done""#;
    lone_high_surrogate on br#""\uD800""#;
    lone_low_surrogate on br#""\uDC00""#;
    high_followed_by_plain_text on br#""\uD800abcd""#;
    high_followed_by_other_escape on br#""\uD800\n""#;
    high_followed_by_bmp_escape on br#""\uD800\u0041""#;
}

fn pair_combines_to_emoji<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(decoder.get_string("", usize::MAX), "\u{1F600}");
    assert!(decoder.success());
}

fn pair_at_plane_boundaries<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(
        decoder.get_string("", usize::MAX),
        "\u{10000} \u{10FFFF}"
    );
    assert!(decoder.success());
}

fn pair_mixes_with_plain_text<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(decoder.get_string("", usize::MAX), "ok \u{1F600} done");
    assert!(decoder.success());
}

fn lone_high_surrogate<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(decoder.try_string(usize::MAX), None);
    assert_eq!(
        decoder.error_message(),
        Some("high surrogate not followed by \\u escape")
    );
}

fn lone_low_surrogate<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(decoder.try_string(usize::MAX), None);
    assert_eq!(
        decoder.error_message(),
        Some("low surrogate without preceding high surrogate")
    );
}

fn high_followed_by_plain_text<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(decoder.try_string(usize::MAX), None);
    assert_eq!(
        decoder.error_message(),
        Some("high surrogate not followed by \\u escape")
    );
}

fn high_followed_by_other_escape<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(decoder.try_string(usize::MAX), None);
    assert_eq!(
        decoder.error_message(),
        Some("high surrogate not followed by \\u escape")
    );
}

fn high_followed_by_bmp_escape<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(decoder.try_string(usize::MAX), None);
    assert_eq!(
        decoder.error_message(),
        Some("high surrogate without following low surrogate")
    );
}
