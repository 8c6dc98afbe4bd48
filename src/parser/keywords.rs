//! Keyword prefix tree
//!
//! The lexer walks a run of letters through [`KeywordTrie`] so that it stops
//! extending a word at the point where it can no longer become a keyword. The
//! exact-match check only happens after that greedy walk, which keeps `LET`
//! a keyword while `LETTER` and `IFS` stay identifiers.

use super::lexer::TokenKind;
use rustc_hash::FxHashMap;

/// Reserved words and the token kind each one produces. Matching is
/// case-sensitive; only the upper-case spelling is a keyword.
pub const KEYWORDS: [(&str, TokenKind); 11] = [
    ("LABEL", TokenKind::Label),
    ("GOTO", TokenKind::Goto),
    ("PRINT", TokenKind::Print),
    ("INPUT", TokenKind::Input),
    ("LET", TokenKind::Let),
    ("IF", TokenKind::If),
    ("THEN", TokenKind::Then),
    ("ENDIF", TokenKind::EndIf),
    ("WHILE", TokenKind::While),
    ("REPEAT", TokenKind::Repeat),
    ("ENDWHILE", TokenKind::EndWhile),
];

#[derive(Debug, Default)]
struct TrieNode {
    children: FxHashMap<char, TrieNode>,
    /// Set when the path from the root to this node spells a whole keyword
    keyword: Option<TokenKind>,
}

/// Prefix tree over [`KEYWORDS`], built once per lexer.
#[derive(Debug, Default)]
pub struct KeywordTrie {
    root: TrieNode,
}

impl KeywordTrie {
    /// Build a trie holding every reserved word.
    pub fn new() -> Self {
        let mut trie = Self::default();
        for (word, kind) in KEYWORDS {
            trie.insert(word, kind);
        }
        trie
    }

    fn insert(&mut self, word: &str, kind: TokenKind) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.keyword = Some(kind);
    }

    fn node(&self, prefix: &str) -> Option<&TrieNode> {
        prefix
            .chars()
            .try_fold(&self.root, |node, ch| node.children.get(&ch))
    }

    /// Token kind of `word` if it is exactly a keyword.
    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        self.node(word).and_then(|node| node.keyword)
    }

    /// True when some keyword begins with `prefix` (a keyword is a prefix of itself).
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.node(prefix).is_some()
    }
}
