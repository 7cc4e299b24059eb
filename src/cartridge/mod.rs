// Cartridge module - iNES ROM parsing and cartridge state
//
// A mapper-0 (NROM) cartridge is immutable after load: PRG-ROM, CHR memory,
// and the header-derived mirroring flag. There is no bank switching.
//
// # iNES Header Layout (16 bytes)
//
// ```text
// 0-3:  Signature "NES" followed by 0x1A
// 4:    PRG-ROM size in 16KB units
// 5:    CHR-ROM size in 8KB units (0 means the board carries 8KB of CHR-RAM)
// 6:    Flags: bit 0 selects mirroring (0 = horizontal, 1 = vertical)
// 7:    Flags (ignored)
// 8:    PRG-RAM size in 8KB units (0 means 8KB)
// 9-15: Ignored
// ```
//
// The payload is PRG-ROM followed by CHR-ROM, in that order.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Size of the iNES header in bytes
pub const INES_HEADER_SIZE: usize = 16;

/// PRG-ROM bank granularity (16KB)
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// CHR bank granularity (8KB)
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// PRG-RAM (save RAM) granularity (8KB)
pub const PRG_RAM_BANK_SIZE: usize = 8 * 1024;

/// Nametable mirroring arrangement, selected by iNES header byte 6 bit 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// $2000=$2400 and $2800=$2C00 (vertical scrolling layouts)
    Horizontal,
    /// $2000=$2800 and $2400=$2C00 (horizontal scrolling layouts)
    Vertical,
}

/// Error raised while loading an iNES image
///
/// Each variant corresponds to one of the process exit codes reported by the
/// CLI when a load fails before emulation starts.
#[derive(Debug)]
pub enum INesError {
    /// The ROM file could not be opened (exit code -1)
    FileNotFound(io::Error),
    /// The 16-byte header was short or carried a bad signature (exit code -2)
    HeaderReadFailed,
    /// The header declared an image no allocation can back, e.g. zero PRG
    /// banks (exit code -3)
    AllocationFailed,
    /// The payload ended before the declared PRG-ROM was read (exit code -4)
    PrgReadFailed,
    /// The payload ended before the declared CHR-ROM was read (exit code -5)
    ChrReadFailed,
}

impl INesError {
    /// Process exit code associated with this load failure
    pub fn exit_code(&self) -> i32 {
        match self {
            INesError::FileNotFound(_) => -1,
            INesError::HeaderReadFailed => -2,
            INesError::AllocationFailed => -3,
            INesError::PrgReadFailed => -4,
            INesError::ChrReadFailed => -5,
        }
    }
}

impl fmt::Display for INesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            INesError::FileNotFound(e) => write!(f, "ROM file could not be opened: {}", e),
            INesError::HeaderReadFailed => write!(f, "iNES header read failed"),
            INesError::AllocationFailed => write!(f, "iNES header declares an empty PRG-ROM"),
            INesError::PrgReadFailed => write!(f, "PRG-ROM data truncated"),
            INesError::ChrReadFailed => write!(f, "CHR-ROM data truncated"),
        }
    }
}

impl std::error::Error for INesError {}

/// A parsed mapper-0 cartridge
///
/// Immutable after load. PRG-ROM length is a multiple of 16KB; CHR length is
/// a multiple of 8KB (a zero-size header entry yields 8KB of zeroed CHR-RAM).
#[derive(Debug)]
pub struct Cartridge {
    /// Program ROM, mapped at $8000-$FFFF modulo its length
    pub prg_rom: Vec<u8>,
    /// Character memory backing the PPU pattern tables
    pub chr_rom: Vec<u8>,
    /// True when the board carries CHR-RAM (header byte 5 == 0): pattern
    /// memory is writable
    pub chr_is_ram: bool,
    /// Nametable mirroring arrangement
    pub mirroring: Mirroring,
    /// Save RAM size in bytes ($6000-$7FFF window)
    pub prg_ram_size: usize,
}

impl Cartridge {
    /// Parse a cartridge out of a full iNES image held in memory
    ///
    /// # Errors
    ///
    /// Returns the `INesError` variant matching the first malformed region
    /// of the image (header, PRG payload, CHR payload).
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, INesError> {
        if data.len() < INES_HEADER_SIZE {
            return Err(INesError::HeaderReadFailed);
        }

        let header = &data[..INES_HEADER_SIZE];
        if &header[0..4] != b"NES\x1A" {
            return Err(INesError::HeaderReadFailed);
        }

        let prg_rom_size = header[4] as usize * PRG_BANK_SIZE;
        let mut chr_rom_size = header[5] as usize * CHR_BANK_SIZE;
        let chr_is_ram = chr_rom_size == 0;
        if chr_is_ram {
            chr_rom_size = CHR_BANK_SIZE;
        }
        let mut prg_ram_size = header[8] as usize * PRG_RAM_BANK_SIZE;
        if prg_ram_size == 0 {
            prg_ram_size = PRG_RAM_BANK_SIZE;
        }

        if prg_rom_size == 0 {
            return Err(INesError::AllocationFailed);
        }

        let mirroring = if header[6] & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let prg_start = INES_HEADER_SIZE;
        let prg_end = prg_start + prg_rom_size;
        if data.len() < prg_end {
            return Err(INesError::PrgReadFailed);
        }
        let prg_rom = data[prg_start..prg_end].to_vec();

        let chr_rom = if chr_is_ram {
            vec![0u8; chr_rom_size]
        } else {
            let chr_end = prg_end + chr_rom_size;
            if data.len() < chr_end {
                return Err(INesError::ChrReadFailed);
            }
            data[prg_end..chr_end].to_vec()
        };

        Ok(Cartridge {
            prg_rom,
            chr_rom,
            chr_is_ram,
            mirroring,
            prg_ram_size,
        })
    }

    /// Load a cartridge from an iNES file on disk
    ///
    /// # Errors
    ///
    /// `INesError::FileNotFound` when the file cannot be opened; otherwise
    /// the parse errors of [`Cartridge::from_ines_bytes`].
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, INesError> {
        let mut file = fs::File::open(path).map_err(INesError::FileNotFound)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|_| INesError::HeaderReadFailed)?;
        Self::from_ines_bytes(&data)
    }

    /// Human-readable metadata block for the `-i` CLI mode
    pub fn metadata(&self) -> String {
        format!(
            "ROM Metadata: =============================\n\
             Mapper: 0 (NROM)\n\
             PRG ROM Size: {} KB\n\
             CHR {} Size: {} KB\n\
             PRG RAM Size: {} KB\n\
             Mirroring: {:?}\n\
             ==========================================",
            self.prg_rom.len() / 1024,
            if self.chr_is_ram { "RAM" } else { "ROM" },
            self.chr_rom.len() / 1024,
            self.prg_ram_size / 1024,
            self.mirroring,
        )
    }
}
