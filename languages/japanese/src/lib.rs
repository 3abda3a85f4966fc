pub mod builtin;
pub mod dictionary;
pub mod extractor;
pub mod import;
pub mod index;
pub mod loader;
pub mod notebook;
pub mod processor;
pub mod script;
pub mod segmenter;

pub use builtin::BuiltinWords;
pub use dictionary::{VocabDictionary, VocabEntry};
pub use extractor::{PENDING, UnknownWord, VocabularyExtractor, now_ms};
pub use import::{ImportError, ImportFormat};
pub use index::VocabularyIndex;
pub use loader::{FileSource, HttpSource, LoadError, VocabSource, source_for};
pub use notebook::{Notebook, NotebookView};
pub use processor::JapaneseProcessor;
pub use segmenter::{HiraganaPolicy, JapaneseSegmenter};
