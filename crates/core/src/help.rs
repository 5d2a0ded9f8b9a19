//! Online help texts for the keyboard commands.

/// Which screen the help is being shown for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpContext {
    InGame,
    BetweenGames,
    ScoreList,
    FileList,
}

impl HelpContext {
    pub fn all() -> [Self; 4] {
        use HelpContext::*;
        [InGame, BetweenGames, ScoreList, FileList]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    pub keys: &'static str,
    pub action: &'static str,
}

/// A two-column table of key bindings and what they do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpTable {
    /// Blank columns between the key and action columns.
    pub sep: u8,
    pub entries: &'static [HelpEntry],
}

impl HelpTable {
    /// Width of the key column.
    pub fn key_width(&self) -> usize {
        self.entries.iter().map(|e| e.keys.len()).max().unwrap_or(0)
    }

    /// Format rows with the action column aligned.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let width = self.key_width() + self.sep as usize;
        self.entries
            .iter()
            .map(move |e| format!("{:<width$}{}", e.keys, e.action))
    }
}

const fn e(keys: &'static str, action: &'static str) -> HelpEntry {
    HelpEntry { keys, action }
}

static INGAME: HelpTable = HelpTable {
    sep: 4,
    entries: &[
        e("arrows", "move Chip"),
        e("2 4 6 8 (keypad)", "also move Chip"),
        e("Q", "quit the current game"),
        e("Bkspc", "pause the game"),
        e("Ctrl-R", "restart the current level"),
        e("Ctrl-P", "jump to the previous level"),
        e("Ctrl-N", "jump to the next level"),
        e("V", "decrease volume"),
        e("Shift-V", "increase volume"),
        e("Ctrl-C", "exit the program"),
        e("Alt-F4", "exit the program"),
    ],
};

static TWIXTGAMES: HelpTable = HelpTable {
    sep: 2,
    entries: &[
        e("P", "jump to the previous level"),
        e("N", "jump to the next level"),
        e("PgUp", "skip back ten levels"),
        e("PgDn", "skip ahead ten levels"),
        e("G", "go to a level using a password"),
        e("S", "see the scores for each level"),
        e("Tab", "playback saved solution"),
        e("Shift-Tab", "verify saved solution"),
        e("Ctrl-X", "replace existing solution"),
        e("Shift-Ctrl-X", "delete existing solution"),
        e("Ctrl-S", "see the available solution files"),
        e("O", "toggle between even-step and odd-step offset"),
        e("Shift-O", "increment stepping offset (Lynx only)"),
        e("V", "decrease volume"),
        e("Shift-V", "increase volume"),
        e("Q", "return to the file list"),
        e("Ctrl-C", "exit the program"),
        e("Alt-F4", "exit the program"),
    ],
};

static SCORELIST: HelpTable = HelpTable {
    sep: 2,
    entries: &[
        e("up down", "move selection"),
        e("PgUp PgDn", "scroll selection"),
        e("Enter Space", "select level"),
        e("Ctrl-S", "change solution file"),
        e("Q", "return to the last level"),
        e("Ctrl-C", "exit the program"),
        e("Alt-F4", "exit the program"),
    ],
};

static FILELIST: HelpTable = HelpTable {
    sep: 2,
    entries: &[
        e("up down", "move selection"),
        e("PgUp PgDn", "scroll selection"),
        e("Enter Space", "select"),
        e("Q", "cancel"),
        e("Ctrl-C", "exit the program"),
        e("Alt-F4", "exit the program"),
    ],
};

/// Key-binding documentation for one screen.
pub fn help_table(context: HelpContext) -> &'static HelpTable {
    match context {
        HelpContext::InGame => &INGAME,
        HelpContext::BetweenGames => &TWIXTGAMES,
        HelpContext::ScoreList => &SCORELIST,
        HelpContext::FileList => &FILELIST,
    }
}
