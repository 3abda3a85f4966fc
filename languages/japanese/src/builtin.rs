use std::collections::HashMap;

use crate::dictionary::VocabEntry;

/// Built-in common words, always known to the index and used as a lookup fallback
pub struct BuiltinWords {
    words: HashMap<String, VocabEntry>,
}

impl BuiltinWords {
    /// Create an empty word list
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// Create with the embedded greetings, nouns, verbs and adjectives
    pub fn with_defaults() -> Self {
        // (word, romaji, meaning); meanings are Chinese glosses
        let common_words = [
            ("こんにちは", "konnichiwa", "你好"),
            ("ありがとう", "arigatou", "谢谢"),
            ("すみません", "sumimasen", "对不起/不好意思"),
            ("はじめまして", "hajimemashite", "初次见面"),
            ("よろしく", "yoroshiku", "请多关照"),
            ("おはよう", "ohayou", "早上好"),
            ("こんばんは", "konbanwa", "晚上好"),
            ("さようなら", "sayounara", "再见"),
            ("日本語", "nihongo", "日语"),
            ("勉強", "benkyou", "学习"),
            ("先生", "sensei", "老师"),
            ("学生", "gakusei", "学生"),
            ("友達", "tomodachi", "朋友"),
            ("家族", "kazoku", "家人"),
            ("仕事", "shigoto", "工作"),
            ("会社", "kaisha", "公司"),
            ("学校", "gakkou", "学校"),
            ("時間", "jikan", "时间"),
            ("今日", "kyou", "今天"),
            ("明日", "ashita", "明天"),
            ("昨日", "kinou", "昨天"),
            ("今", "ima", "现在"),
            ("食べる", "taberu", "吃"),
            ("飲む", "nomu", "喝"),
            ("見る", "miru", "看"),
            ("聞く", "kiku", "听"),
            ("話す", "hanasu", "说话"),
            ("読む", "yomu", "读"),
            ("書く", "kaku", "写"),
            ("行く", "iku", "去"),
            ("来る", "kuru", "来"),
            ("帰る", "kaeru", "回去"),
            ("美しい", "utsukushii", "美丽的"),
            ("大きい", "ookii", "大的"),
            ("小さい", "chiisai", "小的"),
            ("新しい", "atarashii", "新的"),
            ("古い", "furui", "旧的"),
            ("良い", "yoi/ii", "好的"),
            ("悪い", "warui", "坏的"),
            ("高い", "takai", "高的/贵的"),
            ("安い", "yasui", "便宜的"),
            ("忙しい", "isogashii", "忙的"),
        ];

        let words = common_words
            .into_iter()
            .map(|(word, romaji, meaning)| {
                (
                    word.to_string(),
                    VocabEntry {
                        romaji: romaji.to_string(),
                        meaning: meaning.to_string(),
                        ..VocabEntry::default()
                    },
                )
            })
            .collect();

        Self { words }
    }

    pub fn get(&self, word: &str) -> Option<&VocabEntry> {
        self.words.get(word)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &VocabEntry)> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for BuiltinWords {
    fn default() -> Self {
        Self::with_defaults()
    }
}
