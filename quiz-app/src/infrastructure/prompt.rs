//! Instruction templates sent to the model.

pub const MAX_SOURCE_CHARS: usize = 8000;

const CONSTRAINT_RULES: &str = r#"・必ず「問題文」「正解」「別解/正誤判定基準」「解説」「出典」の要素を含めてください。
・出力はJSON形式で、以下のキーを持つオブジェクトとしてください: "question", "answer", "alternativeAnswers", "explanation", "source"
・"source"にはウェブページタイトルとURLを含めてください。
・問題の後半で問題の答えを一意に絞れるような情報を盛り込んでください。
・日本語での呼び方と外来語としての呼び方の両方が存在する場合、別解として"alternativeAnswers"にその旨を記載するか、どちらか一方に限定できる問題文に改めてください。
・文末は「～でしょう？」としてください。
・「日本で一番高い山は富士山ですが、世界で一番高い山は何でしょう？」のような前半と後半が対照的な問題（パラレル問題）は「～ですが、～」とする。
・パラレル問題では対照的なキーワードを**強調**してください。
・体言止めは避けてください。
・作品名は『』（2重鍵かっこ）で囲んでください。
・問題文は80文字以内にしてください。
・漢字検定2級程度の語彙には後ろから()でルビを追加してください。
・最初は広い情報から入り、徐々に狭い情報に絞ってください。
・前半に知名度が低い情報、後半に知名度が高い情報を配置してください。"#;

/// Cuts `text` down to at most `max_chars` characters.
pub fn truncate_source_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            tracing::info!("Source text truncated to {} chars", max_chars);
            text[..byte_index].to_string()
        }
        None => text.to_string(),
    }
}

/// Single-pass prompt: the model answers with the final JSON object directly.
pub fn build_quiz_prompt(title: &str, url: &str, text: &str) -> String {
    format!(
        r#"
# 役割
あなたはプロのクイズ作家であり、JSONの専門家です。

# タスク
以下の「文章」と「出典情報」を基にして、競技クイズで使えるような本格的なクイズを1問作成してください。

# 制約条件
{rules}

# 最重要ルール
・あなたの応答は、解説や挨拶を一切含んではいけません。
・あなたの応答は、**「制約条件」をすべて満たしたJSONオブジェクトそのもの**である必要があります。

# 出典情報
・タイトル: {title}
・URL: {url}

# 文章
{text}
"#,
        rules = CONSTRAINT_RULES,
        title = title,
        url = url,
        text = text
    )
}

/// First call of the two-pass pipeline.
pub fn build_draft_prompt(title: &str, url: &str, text: &str) -> String {
    format!(
        r#"
# 役割
あなたはプロのクイズ作家です。

# タスク
以下の文章を基にして、競技クイズで使えるような本格的なクイズを1問作成してください。

# 制約条件
{rules}

# 出典情報
・タイトル: {title}
・URL: {url}

# 文章
{text}
"#,
        rules = CONSTRAINT_RULES,
        title = title,
        url = url,
        text = text
    )
}

/// Second call of the two-pass pipeline: review `draft` against the rules.
pub fn build_refine_prompt(draft: &str) -> String {
    format!(
        r#"
# 役割
あなたは、AIが生成したクイズを評価し、修正する品質保証の専門家です。

# タスク
AIが生成した以下の「生成物」が、「制約条件」を完全に満たしているか厳密にチェックしてください。
もし一つでも違反があれば、すべての違反箇所を修正し、制約条件を完全に満たした**最終的なJSONオブジェクトのみを出力**してください。
もし違反がなければ、元の「生成物」を**そのままJSONオブジェクトとして出力**してください。

**重要：あなたの応答は、解説や挨拶を一切含んではいけません。あなたの応答は、JSONオブジェクトそのものである必要があります。**

# 制約条件
{rules}

# AIによる生成物
{draft}
"#,
        rules = CONSTRAINT_RULES,
        draft = draft
    )
}
