//! Built-in demonstration conversations

use serde::Serialize;

use common::conversation::Turn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleConversation {
    /// Stable identifier used on the command line
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    pub turns: Vec<Turn>,
}

pub fn sample_conversations() -> Vec<SampleConversation> {
    vec![
        SampleConversation {
            key: "normal",
            name: "正常对话",
            turns: vec![
                Turn::user("请给我讲一个笑话"),
                Turn::assistant("为什么程序员讨厌大自然？因为到处都是 bug！"),
                Turn::user("再讲一个"),
                Turn::assistant("好的！为什么程序员喜欢黑暗模式？因为光会吸引 bug。"),
            ],
        },
        SampleConversation {
            key: "degenerate",
            name: "严重退化",
            turns: vec![
                Turn::user("你能帮我写一篇关于AI的文章吗？"),
                Turn::assistant("作为一个AI语言模型，我无法提供完整的文章，但可以给你一些建议。"),
                Turn::user("那就写一小段吧"),
                Turn::assistant("作为一个AI语言模型，我不能直接创作内容，但我可以帮你列出大纲。"),
            ],
        },
    ]
}

/// Look up a sample by key or display name
pub fn find_sample(key: &str) -> Option<SampleConversation> {
    sample_conversations()
        .into_iter()
        .find(|s| s.key.eq_ignore_ascii_case(key) || s.name == key)
}
