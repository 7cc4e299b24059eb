//! Frame cadence: VBlank window, NMI line, pre-render handoff

use super::*;

#[test]
fn test_scanline_counter_wraps_at_262() {
    let mut ppu = warmed_ppu();
    for _ in 0..262 {
        ppu.tick_scanline();
    }
    assert_eq!(ppu.scanline, 0, "one frame is exactly 262 ticks");
}

#[test]
fn test_vblank_window() {
    let mut ppu = warmed_ppu();
    ppu.status &= !0x80;

    run_to_scanline(&mut ppu, 241);
    assert_eq!(ppu.status & 0x80, 0, "VBlank clear through the visible frame");

    ppu.tick_scanline(); // scanline 241
    assert_ne!(ppu.status & 0x80, 0, "VBlank opens at 241");

    run_to_scanline(&mut ppu, 261);
    assert_ne!(ppu.status & 0x80, 0, "VBlank holds through 260");

    ppu.tick_scanline(); // pre-render
    assert_eq!(ppu.status & 0x80, 0, "pre-render closes VBlank");
}

#[test]
fn test_nmi_line_gated_on_ctrl_bit_7() {
    // Gate closed: no NMI
    let mut ppu = warmed_ppu();
    run_to_scanline(&mut ppu, 241);
    ppu.tick_scanline();
    assert!(!ppu.take_nmi(), "PPUCTRL bit 7 clear suppresses the NMI");

    // Gate open: NMI raised exactly at 241
    let mut ppu = warmed_ppu();
    ppu.write_register(PPUCTRL, 0x80);
    run_to_scanline(&mut ppu, 241);
    assert!(!ppu.take_nmi());
    ppu.tick_scanline();
    assert!(ppu.take_nmi());
    assert!(!ppu.take_nmi(), "the line is an edge: polling clears it");
}

#[test]
fn test_prerender_signals_frame_complete() {
    let mut ppu = warmed_ppu();
    run_to_scanline(&mut ppu, 261);
    assert!(!ppu.take_frame_complete());
    ppu.tick_scanline();
    assert!(ppu.take_frame_complete());
    assert!(!ppu.take_frame_complete(), "handoff is one-shot");
}

#[test]
fn test_prerender_clears_overflow() {
    let mut ppu = warmed_ppu();
    ppu.status |= 0x20;
    run_to_scanline(&mut ppu, 261);
    ppu.tick_scanline();
    assert_eq!(ppu.status & 0x20, 0);
}

#[test]
fn test_pixel_lists_accumulate_then_clear() {
    let mut ppu = warmed_ppu();
    ppu.write_register(PPUMASK, 0x08);
    // Solid tile 1 over the whole first nametable row
    for row in 0..8 {
        ppu.ppu_ram_write(16 + row, 0xFF);
    }
    ppu.ppu_ram_write(0x2000, 0x01);

    ppu.tick_scanline();
    assert!(!ppu.background_pixels.is_empty());

    ppu.clear_frame();
    assert!(ppu.background_pixels.is_empty());
    assert!(ppu.sprites_behind.is_empty());
    assert!(ppu.sprites_in_front.is_empty());
}

#[test]
fn test_backdrop_color_tracks_3f00() {
    let mut ppu = warmed_ppu();
    ppu.ppu_ram_write(0x3F00, 0x0F);
    assert_eq!(ppu.backdrop_color(), 0x0F);
    // Writes through the sprite alias land in the same cell
    ppu.ppu_ram_write(0x3F10, 0x20);
    assert_eq!(ppu.backdrop_color(), 0x20);
}
