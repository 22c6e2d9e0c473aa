// ==========================================
// KOL 导入系统 - 导入层
// ==========================================
// 职责: 外部表格数据导入，生成规范 KOL 记录
// 支持: CSV/TXT, JSON, Excel
// ==========================================

// 模块声明
pub mod alias_table;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod kol_importer_impl;
pub mod kol_importer_trait;
pub mod progress;
pub mod record_builder;
pub mod row_validator;
pub mod tokenizer;
pub mod type_classifier;

// 重导出核心类型
pub use alias_table::{resolve, KolField};
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use data_cleaner::{parse_rate, parse_rate_with_marker, split_values};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, InputFormat, JsonParser, UniversalFileParser};
pub use kol_importer_impl::KolImporterImpl;
pub use progress::{CancellationFlag, ImportProgressListener, NoopProgressListener};
pub use record_builder::{build_record, normalize_row};
pub use row_validator::{is_importable, RowValidator as RowValidatorImpl};
pub use tokenizer::{escape_field, join_fields, tokenize, tokenize_line};
pub use type_classifier::{classify, PlatformPresence, TypeClassifier as TypeClassifierImpl};

// 重导出 Trait 接口
pub use kol_importer_trait::{
    DataCleaner, FieldMapper, FileParser, KolImporter, RowValidator, TypeClassifier,
};
