// ==========================================
// KOL 导入系统 - 导入模板
// ==========================================
// 静态示例文件，表头使用面向人工填写的别名
// ==========================================

/// 模板文件名
pub const TEMPLATE_FILE_NAME: &str = "kol_import_template.csv";

/// 模板内容
pub const TEMPLATE_CSV: &str = "\
Name,Instagram,Rate for Instagram,TikTok,Rate for TikTok,Facebook,Rate for Facebook,Twitter,Rate for Twitter,Threads,Rate for Threads,Blog,Rate for Blog,Rate,Niche,Gender,Hair Style,Race,Address,Contact Number,PIC,Notes,Rate Details
Aisyah Rahman,https://instagram.com/aisyah,\"RM1,500\",https://tiktok.com/@aisyah,RM2000,,,,,,,,,,Beauty;Lifestyle,Female,Hijab,Malay,Kuala Lumpur,012-3456789,Farah,Prefers weekday shoots,\"IG post RM1,500; TikTok video RM2,000\"
John Tan,,,,,,,https://twitter.com/johntan,RM800,https://threads.net/@johntan,RM600,,,,Tech|Gaming,Male,Short,Chinese,Penang,016-9876543,Daniel,,
Mei Ling,,,,,,,,,,,https://meiling.blog,RM1200,,\"Food, Travel\",Female,Long,Chinese,Johor Bahru,017-2223333,Farah,Blog review with photos,
";
