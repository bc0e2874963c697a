//! Record-level framing: `[u16 length][u8 record type][u8 data type]`
//! followed by `length - 4` payload bytes, everything big-endian.

use crate::Error;
use crate::real8::{decode_real8, encode_real8};

pub(crate) mod rtype {
    pub const HEADER: u8 = 0x00;
    pub const BGNLIB: u8 = 0x01;
    pub const LIBNAME: u8 = 0x02;
    pub const UNITS: u8 = 0x03;
    pub const ENDLIB: u8 = 0x04;
    pub const BGNSTR: u8 = 0x05;
    pub const STRNAME: u8 = 0x06;
    pub const ENDSTR: u8 = 0x07;
    pub const BOUNDARY: u8 = 0x08;
    pub const SREF: u8 = 0x0A;
    pub const AREF: u8 = 0x0B;
    pub const LAYER: u8 = 0x0D;
    pub const DATATYPE: u8 = 0x0E;
    pub const XY: u8 = 0x10;
    pub const ENDEL: u8 = 0x11;
    pub const SNAME: u8 = 0x12;
    pub const STRANS: u8 = 0x1A;
    pub const MAG: u8 = 0x1B;
    pub const ANGLE: u8 = 0x1C;
}

pub(crate) mod dtype {
    pub const NONE: u8 = 0x00;
    pub const I16: u8 = 0x02;
    pub const I32: u8 = 0x03;
    pub const REAL8: u8 = 0x05;
    pub const ASCII: u8 = 0x06;
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RawRecord<'a> {
    pub rectype: u8,
    pub payload: &'a [u8],
    pub offset: usize,
}

impl RawRecord<'_> {
    pub fn i16s(&self) -> Result<Vec<i16>, Error> {
        if self.payload.len() % 2 != 0 {
            return Err(Error::Malformed {
                offset: self.offset,
                what: "odd i16 payload",
            });
        }
        Ok(self
            .payload
            .chunks_exact(2)
            .map(|c| i16::from_be_bytes([c[0], c[1]]))
            .collect())
    }

    pub fn i32s(&self) -> Result<Vec<i32>, Error> {
        if self.payload.len() % 4 != 0 {
            return Err(Error::Malformed {
                offset: self.offset,
                what: "odd i32 payload",
            });
        }
        Ok(self
            .payload
            .chunks_exact(4)
            .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    pub fn real8s(&self) -> Result<Vec<f64>, Error> {
        if self.payload.len() % 8 != 0 {
            return Err(Error::Malformed {
                offset: self.offset,
                what: "odd real8 payload",
            });
        }
        Ok(self
            .payload
            .chunks_exact(8)
            .map(|c| {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(c);
                decode_real8(bytes)
            })
            .collect())
    }

    /// ASCII payload with the optional even-length NUL padding removed.
    pub fn ascii(&self) -> String {
        let end = self
            .payload
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.payload.len());
        String::from_utf8_lossy(&self.payload[..end]).into_owned()
    }
}

pub(crate) struct RecordReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn next_record(&mut self) -> Result<Option<RawRecord<'a>>, Error> {
        if self.pos == self.buf.len() {
            return Ok(None);
        }
        if self.buf.len() - self.pos < 4 {
            return Err(Error::Truncated { offset: self.pos });
        }

        let offset = self.pos;
        let len = u16::from_be_bytes([self.buf[offset], self.buf[offset + 1]]) as usize;
        if len < 4 || offset + len > self.buf.len() {
            return Err(Error::Truncated { offset });
        }

        let rectype = self.buf[offset + 2];
        let payload = &self.buf[offset + 4..offset + len];
        self.pos = offset + len;
        Ok(Some(RawRecord {
            rectype,
            payload,
            offset,
        }))
    }
}

pub(crate) fn put_record(out: &mut Vec<u8>, rectype: u8, dtype: u8, payload: &[u8]) {
    debug_assert!(payload.len() % 2 == 0, "record payload must be even");
    let len = payload.len() + 4;
    out.extend_from_slice(&(len as u16).to_be_bytes());
    out.push(rectype);
    out.push(dtype);
    out.extend_from_slice(payload);
}

pub(crate) fn put_empty(out: &mut Vec<u8>, rectype: u8) {
    put_record(out, rectype, dtype::NONE, &[]);
}

pub(crate) fn put_i16s(out: &mut Vec<u8>, rectype: u8, values: &[i16]) {
    let mut payload = Vec::with_capacity(values.len() * 2);
    for v in values {
        payload.extend_from_slice(&v.to_be_bytes());
    }
    put_record(out, rectype, dtype::I16, &payload);
}

pub(crate) fn put_i32s(out: &mut Vec<u8>, rectype: u8, values: &[i32]) {
    let mut payload = Vec::with_capacity(values.len() * 4);
    for v in values {
        payload.extend_from_slice(&v.to_be_bytes());
    }
    put_record(out, rectype, dtype::I32, &payload);
}

pub(crate) fn put_real8s(out: &mut Vec<u8>, rectype: u8, values: &[f64]) {
    let mut payload = Vec::with_capacity(values.len() * 8);
    for &v in values {
        payload.extend_from_slice(&encode_real8(v));
    }
    put_record(out, rectype, dtype::REAL8, &payload);
}

pub(crate) fn put_ascii(out: &mut Vec<u8>, rectype: u8, s: &str) {
    let mut payload = s.as_bytes().to_vec();
    if payload.len() % 2 != 0 {
        payload.push(0);
    }
    put_record(out, rectype, dtype::ASCII, &payload);
}

#[cfg(test)]
mod tests {
    use super::{RecordReader, put_ascii, put_i16s, put_i32s, rtype};
    use crate::Error;

    #[test]
    fn frames_round_trip() {
        let mut buf = Vec::new();
        put_i16s(&mut buf, rtype::LAYER, &[134]);
        put_i32s(&mut buf, rtype::XY, &[0, 0, 2000, -2000]);
        put_ascii(&mut buf, rtype::STRNAME, "logo");
        put_ascii(&mut buf, rtype::SNAME, "odd");

        let mut reader = RecordReader::new(&buf);

        let rec = reader.next_record().expect("frame ok").expect("record");
        assert_eq!(rec.rectype, rtype::LAYER);
        assert_eq!(rec.i16s().expect("i16 payload"), vec![134]);

        let rec = reader.next_record().expect("frame ok").expect("record");
        assert_eq!(rec.i32s().expect("i32 payload"), vec![0, 0, 2000, -2000]);

        let rec = reader.next_record().expect("frame ok").expect("record");
        assert_eq!(rec.ascii(), "logo");

        // Odd-length names carry a NUL pad that must not survive decoding.
        let rec = reader.next_record().expect("frame ok").expect("record");
        assert_eq!(rec.ascii(), "odd");

        assert!(reader.next_record().expect("frame ok").is_none());
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let mut buf = Vec::new();
        put_i16s(&mut buf, rtype::LAYER, &[1]);
        buf.truncate(buf.len() - 1);

        let mut reader = RecordReader::new(&buf);
        let err = reader.next_record().expect_err("short payload");
        assert!(matches!(err, Error::Truncated { offset: 0 }));
    }
}
