// SPDX-License-Identifier: Apache-2.0

//! Size-capped string extraction. Truncation drops whole codepoints only,
//! never splits a UTF-8 sequence, and always consumes the full source span
//! so the cursor lands cleanly after the string.

use pulljson::{ChunkReader, Decoder, SliceDecoder, Source, StreamDecoder, StringSink};

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
    plain_ascii_truncates_at_cap on br#""abcdef""#;
    cap_of_zero_yields_empty on br#""abc""#;
    cap_mid_raw_multibyte_drops_whole_char on b"\"a\xc3\xa9b\"";
    cap_mid_escape_drops_whole_char on br#""ab\u00e9""#;
    cap_mid_surrogate_pair_drops_whole_pair on br#""\uD83D\uDE00""#;
    truncated_string_is_fully_consumed on br#"["abcdef", 9]"#;
    exact_fit_is_not_truncated on br#""abc""#;
}

fn plain_ascii_truncates_at_cap<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(decoder.get_string("", 3), "abc");
    assert!(decoder.success());
}

fn cap_of_zero_yields_empty<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(decoder.get_string("", 0), "");
    assert!(decoder.success());
}

fn cap_mid_raw_multibyte_drops_whole_char<S: Source>(decoder: &mut Decoder<S>) {
    // "é" is two bytes; a cap of 2 holds "a" but not "aé"
    assert_eq!(decoder.get_string("", 2), "a");
    assert!(decoder.success());
}

fn cap_mid_escape_drops_whole_char<S: Source>(decoder: &mut Decoder<S>) {
    // the escaped é needs two bytes; cap 3 holds "ab" but not "abé"
    assert_eq!(decoder.get_string("", 3), "ab");
    assert!(decoder.success());
}

fn cap_mid_surrogate_pair_drops_whole_pair<S: Source>(decoder: &mut Decoder<S>) {
    // the combined codepoint needs four bytes; nothing fits under cap 3
    assert_eq!(decoder.get_string("", 3), "");
    assert!(decoder.success());
}

fn truncated_string_is_fully_consumed<S: Source>(decoder: &mut Decoder<S>) {
    let mut items = Vec::new();
    assert!(decoder.try_array(|d, _| {
        if items.is_empty() {
            items.push(d.get_string("", 2));
        } else {
            items.push(d.get_number(0.0).to_string());
        }
    }));
    assert_eq!(items, vec!["ab", "9"]);
    assert!(decoder.success());
}

fn exact_fit_is_not_truncated<S: Source>(decoder: &mut Decoder<S>) {
    assert_eq!(decoder.get_string("", 3), "abc");
    assert!(decoder.success());
}

struct CountingSink {
    reported: Option<usize>,
    data: Vec<u8>,
}

impl StringSink for CountingSink {
    fn alloc(&mut self, size: usize) -> Option<&mut [u8]> {
        self.reported = Some(size);
        self.data.resize(size, 0);
        Some(&mut self.data[..])
    }
}

#[test_log::test]
fn sink_sees_capped_size() {
    let mut decoder = SliceDecoder::new(br#""abcdef""#);
    let mut sink = CountingSink {
        reported: None,
        data: Vec::new(),
    };
    assert!(decoder.read_string_to_buffer(4, &mut sink));
    assert_eq!(sink.reported, Some(4));
    assert_eq!(sink.data, b"abcd");
    assert!(decoder.success());
}
