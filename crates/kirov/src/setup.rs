//! Well-known members of the Red Alert 2 `Setup.mix` archive.

use kirov_common::NameHash;

/// Launcher background image.
pub const BACKGROUND: NameHash = NameHash::from_unsigned(0xB1D5_1F00);

/// Intro animation played when the launcher opens.
pub const INTRO_ANIMATION: NameHash = NameHash::from_unsigned(0x2012_EC16);

/// Palette shared by the setup sprites.
pub const PALETTE: NameHash = NameHash::from_unsigned(0x397C_46E0);

/// Animation shown on the second launcher page.
pub const PAGE_TWO_ANIMATION: NameHash = NameHash::from_unsigned(0xD6D7_5E64);

/// Looping preview animation.
pub const PREVIEW_ANIMATION: NameHash = NameHash::from_unsigned(0x134B_6332);

/// Button click sound.
pub const CLICK_SOUND: NameHash = NameHash::from_unsigned(0xC7A2_3518);

/// Background music.
pub const BACKGROUND_MUSIC: NameHash = NameHash::from_unsigned(0xD6A1_C973);

/// Sound played on the second launcher page.
pub const PAGE_TWO_SOUND: NameHash = NameHash::from_unsigned(0xB1C9_14DD);

/// Sprites in the archive that decode against [`PALETTE`].
pub const SPRITES: [NameHash; 3] = [INTRO_ANIMATION, PAGE_TWO_ANIMATION, PREVIEW_ANIMATION];
