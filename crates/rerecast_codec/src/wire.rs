//! Little-endian scalar access on top of [`Read`] and [`Write`].
//!
//! Every read names the field it belongs to, so that an early end of input can be reported
//! precisely.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::Vec3;

use crate::codec::CodecError;

pub(crate) trait WireRead: Read {
    fn read_wire_i32(&mut self, field: &'static str) -> Result<i32, CodecError> {
        self.read_i32::<LittleEndian>()
            .map_err(|err| CodecError::from_read(err, field))
    }

    fn read_wire_u16(&mut self, field: &'static str) -> Result<u16, CodecError> {
        self.read_u16::<LittleEndian>()
            .map_err(|err| CodecError::from_read(err, field))
    }

    fn read_wire_u32(&mut self, field: &'static str) -> Result<u32, CodecError> {
        self.read_u32::<LittleEndian>()
            .map_err(|err| CodecError::from_read(err, field))
    }

    fn read_wire_f32(&mut self, field: &'static str) -> Result<f32, CodecError> {
        self.read_f32::<LittleEndian>()
            .map_err(|err| CodecError::from_read(err, field))
    }

    fn read_wire_vec3(&mut self, field: &'static str) -> Result<Vec3, CodecError> {
        Ok(Vec3::new(
            self.read_wire_f32(field)?,
            self.read_wire_f32(field)?,
            self.read_wire_f32(field)?,
        ))
    }
}

impl<R: Read + ?Sized> WireRead for R {}

pub(crate) trait WireWrite: Write {
    fn write_wire_i32(&mut self, value: i32) -> io::Result<()> {
        self.write_i32::<LittleEndian>(value)
    }

    fn write_wire_u16(&mut self, value: u16) -> io::Result<()> {
        self.write_u16::<LittleEndian>(value)
    }

    fn write_wire_u32(&mut self, value: u32) -> io::Result<()> {
        self.write_u32::<LittleEndian>(value)
    }

    fn write_wire_f32(&mut self, value: f32) -> io::Result<()> {
        self.write_f32::<LittleEndian>(value)
    }

    fn write_wire_vec3(&mut self, value: Vec3) -> io::Result<()> {
        self.write_wire_f32(value.x)?;
        self.write_wire_f32(value.y)?;
        self.write_wire_f32(value.z)
    }
}

impl<W: Write + ?Sized> WireWrite for W {}
