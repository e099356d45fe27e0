use std::io::Cursor;

use crate::{Endian, RabuError, RandomAccessBuffer, RandomAccessData, Window};

#[test]
fn write_seek_read_round_trip() {
    let mut rabu = RandomAccessBuffer::new();

    assert!(rabu.write_all(&[0x48, 0x49]));
    assert!(rabu.seek(0));
    assert_eq!(rabu.read(), Some(0x48));
    assert_eq!(rabu.read(), Some(0x49));
    assert_eq!(rabu.read(), None);
}

#[test]
fn windowed_random_access() {
    let rabu = RandomAccessBuffer::windowed(vec![0, 1, 2, 3, 4, 5, 6, 7], 2, 3).unwrap();

    assert_eq!(rabu.get(0).unwrap(), 2);
    assert_eq!(rabu.get(2).unwrap(), 4);
    assert!(matches!(
        rabu.get(3),
        Err(RabuError::OutOfRange { offset: 3, .. })
    ));
}

#[test]
fn endian_decides_the_assembled_value() {
    let bytes = vec![0x00, 0x00, 0x01, 0x00];

    let be = RandomAccessData::over(Endian::Big, RandomAccessBuffer::from_vec(bytes.clone()));
    assert_eq!(be.sint32_at(0).unwrap(), 256);

    let le = RandomAccessData::over(Endian::Little, RandomAccessBuffer::from_vec(bytes));
    assert_eq!(le.sint32_at(0).unwrap(), 0x0001_0000);
}

#[test]
fn views_share_storage_but_not_cursors() {
    let base = RandomAccessBuffer::from_vec((0..16u8).collect());

    let mut left = base.view(Window::new(0, 4).unwrap());
    let mut right = base.view(Window::new(8, 4).unwrap());

    assert!(left.seek(2));
    assert_eq!(right.offset(), 0);
    assert_eq!(right.read(), Some(8));
    assert_eq!(left.offset(), 2);
    assert_eq!(left.read(), Some(2));

    // A write through one view is visible to the other: same bytes.
    right.set(1, 0xEE).unwrap();
    assert_eq!(base.get(9).unwrap(), 0xEE);
}

#[test]
fn growth_preserves_written_content() {
    let mut rabu = RandomAccessBuffer::new();
    let before_capacity = rabu.storage_capacity();

    for k in 0..0x300usize {
        assert!(rabu.write(k as u8));
    }
    assert!(rabu.storage_capacity() > before_capacity);
    assert_eq!(rabu.storage_length(), 0x300);

    for k in 0..0x300usize {
        assert_eq!(rabu.get(k).unwrap(), k as u8);
    }
}

#[test]
fn bulk_write_extends_length_exactly() {
    let mut rabu = RandomAccessBuffer::new();
    assert!(rabu.write_all(&[7; 4]));
    assert_eq!(rabu.storage_length(), 4);

    // Append starting at the current logical length.
    assert!(rabu.write_all(&[1, 2, 3]));
    assert_eq!(rabu.storage_length(), 7);

    // Earlier bytes are unchanged and still readable.
    assert_eq!(rabu.get(0).unwrap(), 7);
    assert_eq!(rabu.get(4).unwrap(), 1);

    // Overwriting in the middle leaves the length alone.
    assert!(rabu.seek(1));
    assert!(rabu.write_all(&[0xEE]));
    assert_eq!(rabu.storage_length(), 7);
}

#[test]
fn short_read_then_end_sentinel() {
    let mut rabu = RandomAccessBuffer::from_vec(vec![1, 2, 3]);
    assert!(rabu.seek(1));

    let mut out = [0u8; 8];
    assert_eq!(rabu.read_into(&mut out), 2);
    assert_eq!(&out[..2], &[2, 3]);
    assert_eq!(rabu.offset(), 3);
    assert_eq!(rabu.read(), None);
    assert_eq!(rabu.read_into(&mut out), 0);
}

#[test]
fn reset_is_idempotent() {
    let mut rabu = RandomAccessBuffer::from_vec(vec![9, 9]);
    assert!(rabu.seek(1));

    assert!(rabu.reset());
    let after_reset = rabu.offset();
    assert!(rabu.seek(0));
    assert_eq!(rabu.offset(), after_reset);
    assert_eq!(after_reset, 0);
}

#[test]
fn window_wider_than_data_is_a_configuration_error() {
    let rabu = RandomAccessBuffer::windowed(vec![0; 8], 2, 7).unwrap();

    assert!(matches!(
        rabu.available(),
        Err(RabuError::WindowExceedsStorage {
            index: 2,
            remaining: 7,
            length: 8
        })
    ));
}

#[test]
fn constrained_window_refuses_writes_past_its_extent() {
    let base = RandomAccessBuffer::from_vec(vec![0; 8]);
    let mut view = base.view(Window::new(2, 2).unwrap());

    assert!(view.write_all(&[0xAA, 0xBB]));
    assert!(!view.write(0xCC));
    assert!(!view.write_all(&[0xCC]));
    assert_eq!(base.get(2).unwrap(), 0xAA);
    assert_eq!(base.get(3).unwrap(), 0xBB);
    // The refused byte never landed.
    assert_eq!(base.get(4).unwrap(), 0);
}

#[test]
fn far_offset_window_write_is_refused_not_a_crash() {
    let base = RandomAccessBuffer::from_vec((0..8u8).collect());
    let mut view = base.view(Window::new(600, 2).unwrap());

    // One growth increment cannot reach delta 600; the write backs off.
    assert!(!view.write(0xAA));
    assert_eq!(view.offset(), 0);
    assert_eq!(base.storage_length(), 8);
}

#[test]
fn refused_bulk_write_lands_nothing() {
    let base = RandomAccessBuffer::from_vec(vec![0; 8]);
    let mut view = base.view(Window::new(0, 2).unwrap());

    assert!(!view.write_all(&[1, 2, 3]));
    assert_eq!(base.copy_range(0, 3).unwrap(), vec![0, 0, 0]);
    assert_eq!(view.offset(), 0);
}

#[test]
fn copy_from_consumes_the_requested_count() {
    let mut rabu = RandomAccessBuffer::new();
    let mut src = Cursor::new(vec![5u8; 0x250]);

    assert!(rabu.copy_from(&mut src, 0x250).unwrap());
    assert_eq!(rabu.storage_length(), 0x250);

    // A dry source cannot satisfy the count.
    let mut rabu = RandomAccessBuffer::new();
    let mut short = Cursor::new(vec![5u8; 4]);
    assert!(!rabu.copy_from(&mut short, 10).unwrap());
    assert_eq!(rabu.storage_length(), 4);
}

#[test]
fn copy_to_drains_from_the_cursor() {
    let mut rabu = RandomAccessBuffer::from_vec((0..0x210u32).map(|k| k as u8).collect());
    assert!(rabu.seek(0x10));

    let mut out = Vec::new();
    assert_eq!(rabu.copy_to(&mut out).unwrap(), 0x200);
    assert_eq!(out.len(), 0x200);
    assert_eq!(out[0], 0x10);

    // Drained; nothing left.
    let mut empty = RandomAccessBuffer::new();
    assert_eq!(empty.copy_to(&mut out).unwrap(), 0);
}

#[test]
fn copy_range_is_stateless() {
    let mut rabu = RandomAccessBuffer::from_vec(vec![1, 2, 3, 4]);
    assert!(rabu.seek(1));

    assert_eq!(rabu.copy_range(1, 2).unwrap(), vec![2, 3]);
    assert_eq!(rabu.offset(), 1);
    assert!(rabu.copy_range(2, 3).is_none());
}

#[test]
fn index_of_scans_without_moving_the_cursor() {
    let mut rabu = RandomAccessBuffer::from_vec(vec![b'a', b'b', b'c', b'b']);
    assert!(rabu.seek(1));

    assert_eq!(rabu.index_of(b'b'), Some(1));
    assert_eq!(rabu.index_of(b'c'), Some(2));
    assert_eq!(rabu.index_of(b'z'), None);
    assert_eq!(rabu.offset(), 1);
}

#[test]
fn substring_requires_the_full_run() {
    let rabu = RandomAccessBuffer::from_vec(b"hello".to_vec());

    assert_eq!(rabu.substring(1, 3).unwrap(), "ell");
    assert!(matches!(
        rabu.substring(3, 3),
        Err(RabuError::OutOfRange { offset: 3, .. })
    ));
}

#[test]
fn substring_rejects_bytes_that_are_not_text() {
    let rabu = RandomAccessBuffer::from_vec(vec![0x68, 0xFF, 0xFE, 0x69]);

    assert!(matches!(
        rabu.substring(0, 4),
        Err(RabuError::InvalidArgument(_))
    ));
}

#[test]
fn set_outside_the_data_is_an_error() {
    let mut rabu = RandomAccessBuffer::from_vec(vec![1, 2, 3]);

    assert!(matches!(
        rabu.set(5, 0xAA),
        Err(RabuError::OutOfRange { offset: 5, .. })
    ));
    // A failed set never grows the data.
    assert_eq!(rabu.storage_length(), 3);
}

fn codec_stream_round_trip(endian: Endian) {
    let data = RandomAccessData::new(endian);

    // Encode to a stream.
    let mut wire = Vec::new();
    data.put_uint8(0xAB, &mut wire).unwrap();
    data.put_uint16(0xBEEF, &mut wire).unwrap();
    data.put_sint32(-123_456, &mut wire).unwrap();
    data.put_sint64(-0x0123_4567_89AB_CDEF, &mut wire).unwrap();

    // Decode from the stream, tee-ing into the buffer.
    let mut data = RandomAccessData::new(endian);
    let mut src = Cursor::new(wire.clone());
    assert_eq!(data.uint8_from(&mut src).unwrap(), 0xAB);
    assert_eq!(data.uint16_from(&mut src).unwrap(), 0xBEEF);
    assert_eq!(data.sint32_from(&mut src).unwrap(), -123_456);
    assert_eq!(data.sint64_from(&mut src).unwrap(), -0x0123_4567_89AB_CDEF);

    // The buffer preserved on-stream byte order.
    assert_eq!(data.copy_range(0, wire.len()).unwrap(), wire);

    // Indexed decode agrees.
    assert_eq!(data.uint8_at(0).unwrap(), 0xAB);
    assert_eq!(data.uint16_at(1).unwrap(), 0xBEEF);
    assert_eq!(data.sint32_at(3).unwrap(), -123_456);
    assert_eq!(data.sint64_at(7).unwrap(), -0x0123_4567_89AB_CDEF);

    // Buffer-to-stream emits the stored bytes unchanged.
    assert!(data.reset());
    let mut emitted = Vec::new();
    assert_eq!(data.uint8_to(&mut emitted).unwrap(), 0xAB);
    assert_eq!(data.uint16_to(&mut emitted).unwrap(), 0xBEEF);
    assert_eq!(data.sint32_to(&mut emitted).unwrap(), -123_456);
    assert_eq!(data.sint64_to(&mut emitted).unwrap(), -0x0123_4567_89AB_CDEF);
    assert_eq!(emitted, wire);

    // Unwrapping hands back the teed buffer, word order intact.
    assert_eq!(data.endian(), endian);
    let inner = data.into_inner();
    assert_eq!(inner.storage_length(), wire.len());
}

#[test]
fn codec_round_trips_little_endian() {
    codec_stream_round_trip(Endian::Little);
}

#[test]
fn codec_round_trips_big_endian() {
    codec_stream_round_trip(Endian::Big);
}

#[test]
fn short_stream_fails_a_wide_decode() {
    let mut data = RandomAccessData::new(Endian::Big);
    let mut src = Cursor::new(vec![0x01]);

    assert!(matches!(
        data.uint16_from(&mut src),
        Err(RabuError::UnexpectedEnd { needed: 2, got: 1 })
    ));
}

#[test]
fn short_buffer_fails_a_wide_decode() {
    let mut data = RandomAccessData::over(
        Endian::Little,
        RandomAccessBuffer::from_vec(vec![1, 2, 3]),
    );

    let mut sink = Vec::new();
    assert_eq!(data.uint16_to(&mut sink).unwrap(), 0x0201);
    assert!(matches!(
        data.sint32_to(&mut sink),
        Err(RabuError::UnexpectedEnd { needed: 4, got: 1 })
    ));
}

#[test]
fn encode_validates_the_width() {
    let data = RandomAccessData::new(Endian::Big);
    let mut sink = Vec::new();

    assert!(matches!(
        data.put_uint8(0x100, &mut sink),
        Err(RabuError::InvalidArgument(_))
    ));
    assert!(matches!(
        data.put_uint16(0x1_0000, &mut sink),
        Err(RabuError::InvalidArgument(_))
    ));
    assert!(sink.is_empty());
}
