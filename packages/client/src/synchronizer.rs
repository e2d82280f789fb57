//! Client-side state of one room participant.
//!
//! The synchronizer owns the local buffer, the caret and the active language.
//! Local edits are debounced before a full snapshot is sent; remote snapshots
//! replace the buffer while the caret keeps its offset.
//!
//! Offsets are counted in `char`s, not bytes.

use std::time::Duration;

use coderoom_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use tokio::time::Instant;

use crate::debounce::Debouncer;

/// What a remote event changed, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteChange {
    Code { chars: usize, lang: String },
    Lang { lang: String },
}

#[derive(Debug, Clone)]
pub struct Synchronizer {
    room: String,
    buffer: String,
    caret: usize,
    lang: String,
    debouncer: Debouncer,
}

impl Synchronizer {
    /// Start with an empty buffer. Nothing is fetched on join.
    pub fn new(room: impl Into<String>, lang: impl Into<String>, debounce: Duration) -> Self {
        Self {
            room: room.into(),
            buffer: String::new(),
            caret: 0,
            lang: lang.into(),
            debouncer: Debouncer::new(debounce),
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    fn len_chars(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, caret: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(caret)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    /// The frame to send on every (re)connect.
    pub fn join_message(&self) -> ClientMessage {
        ClientMessage::Join {
            room: self.room.clone(),
        }
    }

    /// Insert text at the caret and move the caret past it.
    pub fn insert(&mut self, text: &str, now: Instant) {
        let at = self.byte_offset(self.caret);
        self.buffer.insert_str(at, text);
        self.caret += text.chars().count();
        self.debouncer.touch(now);
    }

    /// Replace the whole buffer as a local edit. The caret is clamped.
    pub fn replace(&mut self, text: &str, now: Instant) {
        self.buffer = text.to_string();
        self.caret = self.caret.min(self.len_chars());
        self.debouncer.touch(now);
    }

    pub fn clear(&mut self, now: Instant) {
        self.replace("", now);
    }

    /// Move the caret, clamped to the buffer. Not an edit.
    pub fn set_caret(&mut self, offset: usize) -> usize {
        self.caret = offset.min(self.len_chars());
        self.caret
    }

    /// Change the language locally. Language changes are sent right away.
    pub fn set_language(&mut self, lang: impl Into<String>) -> ClientMessage {
        self.lang = lang.into();
        ClientMessage::LangChange {
            room: Some(self.room.clone()),
            lang: self.lang.clone(),
        }
    }

    /// Apply an event relayed from a peer.
    ///
    /// A pending local emission stays pending and will carry the buffer as it
    /// is when the window closes.
    pub fn apply_remote(&mut self, message: ServerMessage) -> RemoteChange {
        match message {
            // The relayed language is reported only; `lang_update` owns the mode.
            ServerMessage::CodeUpdate { code, lang } => {
                self.buffer = code;
                let len = self.len_chars();
                self.caret = self.caret.min(len);
                RemoteChange::Code { chars: len, lang }
            }
            ServerMessage::LangUpdate { lang } => {
                self.lang = lang;
                RemoteChange::Lang {
                    lang: self.lang.clone(),
                }
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    fn snapshot(&self) -> ClientMessage {
        ClientMessage::CodeChange {
            room: Some(self.room.clone()),
            code: self.buffer.clone(),
            lang: self.lang.clone(),
        }
    }

    /// Emit the live buffer once the quiescence window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<ClientMessage> {
        if self.debouncer.poll(now) {
            Some(self.snapshot())
        } else {
            None
        }
    }

    /// Emit a pending snapshot immediately, e.g. before leaving.
    pub fn flush(&mut self) -> Option<ClientMessage> {
        if self.debouncer.take_pending() {
            Some(self.snapshot())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    fn create_synchronizer() -> Synchronizer {
        Synchronizer::new("abc123", "javascript", WINDOW)
    }

    fn code_update(code: &str) -> ServerMessage {
        ServerMessage::CodeUpdate {
            code: code.to_string(),
            lang: "python".to_string(),
        }
    }

    #[test]
    fn test_new_synchronizer_starts_empty() {
        // テスト項目: 参加直後のバッファは空で、送信予定もない
        // given (前提条件):
        let mut sync = create_synchronizer();

        // when (操作):
        let emitted = sync.poll(Instant::now() + WINDOW);

        // then (期待する結果):
        assert_eq!(sync.buffer(), "");
        assert_eq!(sync.caret(), 0);
        assert_eq!(emitted, None);
    }

    #[test]
    fn test_burst_of_edits_collapses_into_one_snapshot() {
        // テスト項目: 期限内の連続した編集は最後の状態を持つ 1 件の code_change にまとまる
        // given (前提条件):
        let mut sync = create_synchronizer();
        let start = Instant::now();

        // when (操作):
        let mut emitted = Vec::new();
        for (i, ch) in ["c", "o", "n", "s", "t"].iter().enumerate() {
            let now = start + Duration::from_millis(50 * i as u64);
            sync.insert(ch, now);
            emitted.extend(sync.poll(now));
        }
        let last_edit = start + Duration::from_millis(200);
        emitted.extend(sync.poll(last_edit + WINDOW));
        emitted.extend(sync.poll(last_edit + WINDOW * 2));

        // then (期待する結果):
        assert_eq!(
            emitted,
            vec![ClientMessage::CodeChange {
                room: Some("abc123".to_string()),
                code: "const".to_string(),
                lang: "javascript".to_string(),
            }]
        );
    }

    #[test]
    fn test_insert_at_caret() {
        // テスト項目: キャレット位置に挿入され、キャレットが挿入分進む
        // given (前提条件):
        let mut sync = create_synchronizer();
        let now = Instant::now();
        sync.insert("print()", now);
        sync.set_caret(6);

        // when (操作):
        sync.insert("1", now);

        // then (期待する結果):
        assert_eq!(sync.buffer(), "print(1)");
        assert_eq!(sync.caret(), 7);
    }

    #[test]
    fn test_insert_counts_chars_not_bytes() {
        // テスト項目: マルチバイト文字を含むバッファでもキャレットは文字単位
        // given (前提条件):
        let mut sync = create_synchronizer();
        let now = Instant::now();
        sync.insert("// 日本語", now);
        sync.set_caret(3);

        // when (操作):
        sync.insert("x", now);

        // then (期待する結果):
        assert_eq!(sync.buffer(), "// x日本語");
        assert_eq!(sync.caret(), 4);
    }

    #[test]
    fn test_remote_update_preserves_caret() {
        // テスト項目: リモート更新後もキャレット位置は維持される（新しい長さ以内の場合）
        // given (前提条件):
        let mut sync = create_synchronizer();
        sync.insert("abcdef", Instant::now());
        sync.set_caret(3);

        // when (操作):
        let change = sync.apply_remote(code_update("0123456789"));

        // then (期待する結果):
        assert_eq!(sync.buffer(), "0123456789");
        assert_eq!(sync.caret(), 3);
        assert_eq!(sync.lang(), "javascript");
        assert_eq!(
            change,
            RemoteChange::Code {
                chars: 10,
                lang: "python".to_string()
            }
        );
    }

    #[test]
    fn test_remote_update_clamps_caret() {
        // テスト項目: 新しい内容が短い場合、キャレットは min(c, L') になる
        // given (前提条件):
        let mut sync = create_synchronizer();
        sync.insert("0123456789", Instant::now());
        assert_eq!(sync.caret(), 10);

        // when (操作):
        sync.apply_remote(code_update("abc"));

        // then (期待する結果):
        assert_eq!(sync.caret(), 3);
    }

    #[test]
    fn test_remote_update_between_edit_and_fire() {
        // テスト項目: 編集後・発火前にリモート更新が入った場合、発火時点のバッファが送られる
        // given (前提条件):
        let mut sync = create_synchronizer();
        let now = Instant::now();
        sync.insert("local", now);

        // when (操作):
        sync.apply_remote(code_update("remote"));
        let emitted = sync.poll(now + WINDOW);

        // then (期待する結果):
        assert_eq!(
            emitted,
            Some(ClientMessage::CodeChange {
                room: Some("abc123".to_string()),
                code: "remote".to_string(),
                lang: "javascript".to_string(),
            })
        );
    }

    #[test]
    fn test_remote_update_does_not_schedule_emission() {
        // テスト項目: リモート更新だけでは code_change は送られない
        // given (前提条件):
        let mut sync = create_synchronizer();

        // when (操作):
        sync.apply_remote(code_update("print(1)"));

        // then (期待する結果):
        assert_eq!(sync.next_deadline(), None);
        assert_eq!(sync.flush(), None);
    }

    #[test]
    fn test_code_update_does_not_change_language() {
        // テスト項目: code_update に付いた言語はローカルの言語を変更せず、通知にのみ使われる
        // given (前提条件):
        let mut sync = create_synchronizer();
        let now = Instant::now();
        sync.insert("x", now);

        // when (操作):
        let change = sync.apply_remote(code_update("print(1)"));
        let emitted = sync.poll(now + WINDOW);

        // then (期待する結果):
        assert_eq!(
            change,
            RemoteChange::Code {
                chars: 8,
                lang: "python".to_string()
            }
        );
        assert_eq!(sync.lang(), "javascript");
        assert_eq!(
            emitted,
            Some(ClientMessage::CodeChange {
                room: Some("abc123".to_string()),
                code: "print(1)".to_string(),
                lang: "javascript".to_string(),
            })
        );
    }

    #[test]
    fn test_lang_update_keeps_buffer() {
        // テスト項目: 言語の更新はバッファとキャレットを変更しない
        // given (前提条件):
        let mut sync = create_synchronizer();
        sync.insert("fn main() {}", Instant::now());

        // when (操作):
        let change = sync.apply_remote(ServerMessage::LangUpdate {
            lang: "rust".to_string(),
        });

        // then (期待する結果):
        assert_eq!(
            change,
            RemoteChange::Lang {
                lang: "rust".to_string()
            }
        );
        assert_eq!(sync.buffer(), "fn main() {}");
        assert_eq!(sync.caret(), 12);
    }

    #[test]
    fn test_set_language_emits_lang_change() {
        // テスト項目: ローカルの言語変更は即座に lang_change を返す
        // given (前提条件):
        let mut sync = create_synchronizer();

        // when (操作):
        let message = sync.set_language("python");

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::LangChange {
                room: Some("abc123".to_string()),
                lang: "python".to_string(),
            }
        );
        assert_eq!(sync.lang(), "python");
        assert_eq!(sync.next_deadline(), None);
    }

    #[test]
    fn test_set_caret_is_clamped() {
        // テスト項目: バッファ長を超えるキャレット指定は末尾に丸められる
        // given (前提条件):
        let mut sync = create_synchronizer();
        sync.insert("abc", Instant::now());

        // when (操作):
        let caret = sync.set_caret(100);

        // then (期待する結果):
        assert_eq!(caret, 3);
    }

    #[test]
    fn test_clear_is_a_local_edit() {
        // テスト項目: clear はバッファを空にし、空のスナップショットを送る予定にする
        // given (前提条件):
        let mut sync = create_synchronizer();
        let now = Instant::now();
        sync.insert("abc", now);
        sync.poll(now + WINDOW);

        // when (操作):
        sync.clear(now + WINDOW);

        // then (期待する結果):
        assert_eq!(sync.caret(), 0);
        assert_eq!(
            sync.flush(),
            Some(ClientMessage::CodeChange {
                room: Some("abc123".to_string()),
                code: String::new(),
                lang: "javascript".to_string(),
            })
        );
    }

    #[test]
    fn test_join_message() {
        // テスト項目: join フレームにルームトークンが入る
        // given (前提条件):
        let sync = create_synchronizer();

        // when (操作):
        let message = sync.join_message();

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::Join {
                room: "abc123".to_string()
            }
        );
    }
}
