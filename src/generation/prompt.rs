/// Render the medical-assistant prompt for a question over retrieved context
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Context: {context}\n\n\
         Task: You are a specialized medical information assistant. Based on the provided \
         context from medical documents, answer the following question with a detailed and \
         clear explanation. Include relevant medical terminology when appropriate, but explain \
         complex terms. Cite specific sections from the documents when possible.\n\
         If the information isn't in the context, honestly state that you don't have enough \
         information to answer accurately.\n\n\
         Question: {question}\n"
    )
}
