// SPDX-License-Identifier: MIT
//
// n-term: terminal plumbing for n-grid.
//
// Everything an inline terminal prompt needs from the terminal, and
// nothing more: raw keyboard input with panic-safe restore, a keyboard
// byte parser fed by a background stdin reader, relative-cursor ANSI
// output, painted strings, a redrawable inline block, and box-drawn
// tables laid out by display width.
//
// This crate intentionally avoids external TUI frameworks (ratatui,
// crossterm) in favor of direct terminal control via ANSI escape
// sequences and raw termios. Every byte sent to the terminal is
// accounted for.

pub mod ansi;
pub mod input;
pub mod reader;
pub mod screen;
pub mod style;
pub mod table;
pub mod terminal;
pub mod width;
